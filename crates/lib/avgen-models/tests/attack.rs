use avgen_core::client::VehicleControl;
use avgen_models::attack::{AttackLabel, AttackSelector, AttackState};

#[test]
fn test_label_strings() {
    assert_eq!(AttackLabel::Normal.to_string(), "Normal");
    assert_eq!(AttackLabel::DoS.to_string(), "DoS_Attack");
    assert_eq!(AttackLabel::Hijacked.to_string(), "Hijacked");
}

#[test]
fn test_draw_covers_all_labels() {
    let mut selector = AttackSelector::new(42);
    let mut seen = [false; 3];
    for _ in 0..200 {
        match selector.draw() {
            AttackLabel::Normal => seen[0] = true,
            AttackLabel::DoS => seen[1] = true,
            AttackLabel::Hijacked => seen[2] = true,
        }
    }
    assert!(seen.iter().all(|label| *label));
}

#[test]
fn test_draw_is_reproducible() {
    let mut first = AttackSelector::new(42);
    let mut second = AttackSelector::new(42);
    for _ in 0..500 {
        assert_eq!(first.draw(), second.draw());
    }
}

#[test]
fn test_normal_clears_both_flags_and_keeps_control() {
    let mut selector = AttackSelector::new(7);
    let state = AttackState::new();
    state.gps_noise.set(true);
    state.control_override.set(true);

    let reported = VehicleControl {
        throttle: 0.3,
        steer: -0.1,
        brake: 0.0,
    };
    let mut control = reported;
    selector.perturb(AttackLabel::Normal, &mut control, &state);

    assert_eq!(control, reported);
    assert!(!state.gps_noise.is_set());
    assert!(!state.control_override.is_set());
}

#[test]
fn test_dos_raises_gps_flag_only() {
    let mut selector = AttackSelector::new(7);
    let state = AttackState::new();

    let reported = VehicleControl::default();
    let mut control = reported;
    selector.perturb(AttackLabel::DoS, &mut control, &state);

    assert_eq!(control, reported);
    assert!(state.gps_noise.is_set());
    assert!(!state.control_override.is_set());
}

#[test]
fn test_hijack_overrides_control_within_bounds() {
    let mut selector = AttackSelector::new(7);
    let state = AttackState::new();
    state.gps_noise.set(true);

    for _ in 0..300 {
        let mut control = VehicleControl::default();
        selector.perturb(AttackLabel::Hijacked, &mut control, &state);
        assert!((-1.0..=1.0).contains(&control.steer));
        assert!((0.0..=1.0).contains(&control.throttle));
        assert!((0.0..=0.5).contains(&control.brake));
    }
    assert!(state.control_override.is_set());
    // A hijack tick does not end a running GPS attack.
    assert!(state.gps_noise.is_set());
}
