use std::sync::Arc;
use std::thread;

use avgen_core::cell::{AttackFlag, SensorCell};

#[test]
fn test_cell_roundtrip() {
    let cell = SensorCell::new(48.1371);
    assert_eq!(cell.load(), 48.1371);
    cell.store(-11.5754);
    assert_eq!(cell.load(), -11.5754);
}

#[test]
fn test_cell_default_is_zero() {
    let cell = SensorCell::default();
    assert_eq!(cell.load(), 0.0);
}

#[test]
fn test_cell_last_writer_wins_across_threads() {
    let cell = Arc::new(SensorCell::new(0.0));
    let writer = cell.clone();
    let handle = thread::spawn(move || {
        for i in 0..1000 {
            writer.store(i as f64);
        }
    });
    while !handle.is_finished() {
        let value = cell.load();
        assert!((0.0..1000.0).contains(&value));
    }
    handle.join().expect("writer thread panicked");
    assert_eq!(cell.load(), 999.0);
}

#[test]
fn test_flag_toggles() {
    let flag = AttackFlag::default();
    assert!(!flag.is_set());
    flag.set(true);
    assert!(flag.is_set());
    flag.set(false);
    assert!(!flag.is_set());
}
