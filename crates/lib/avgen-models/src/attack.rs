use std::fmt;
use std::sync::Arc;

use rand::Rng;
use rand_pcg::Pcg64Mcg;
use serde::Deserialize;

use avgen_core::cell::AttackFlag;
use avgen_core::client::VehicleControl;

use crate::dist::UniformRange;

const STEER_OVERRIDE: UniformRange = UniformRange::new(-1.0, 1.0);
const THROTTLE_OVERRIDE: UniformRange = UniformRange::new(0.0, 1.0);
const BRAKE_OVERRIDE: UniformRange = UniformRange::new(0.0, 0.5);

/// The traffic classification attached to a tick. Closed set; the `Display`
/// strings are the label values written to the dataset.
#[derive(Deserialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
pub enum AttackLabel {
    #[default]
    Normal,
    DoS,
    Hijacked,
}

impl AttackLabel {
    pub const ALL: [AttackLabel; 3] = [AttackLabel::Normal, AttackLabel::DoS, AttackLabel::Hijacked];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackLabel::Normal => "Normal",
            AttackLabel::DoS => "DoS_Attack",
            AttackLabel::Hijacked => "Hijacked",
        }
    }
}

impl fmt::Display for AttackLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two process-wide attack flags. `gps_noise` is observed by the GNSS
/// monitor; `control_override` is recorded but consumed by nothing.
#[derive(Clone, Debug, Default)]
pub struct AttackState {
    pub gps_noise: Arc<AttackFlag>,
    pub control_override: Arc<AttackFlag>,
}

impl AttackState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Draws one label per tick, uniformly and independently, and applies the
/// label's side effects to the flags and the pending control.
#[derive(Debug, Clone)]
pub struct AttackSelector {
    rng: Pcg64Mcg,
}

impl AttackSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::new(seed as u128),
        }
    }

    pub fn draw(&mut self) -> AttackLabel {
        AttackLabel::ALL[self.rng.gen_range(0..AttackLabel::ALL.len())]
    }

    /// Only a Normal tick clears the flags; an attack tick raises its own
    /// flag and leaves the other one untouched.
    pub fn perturb(
        &mut self,
        label: AttackLabel,
        control: &mut VehicleControl,
        state: &AttackState,
    ) {
        match label {
            AttackLabel::DoS => state.gps_noise.set(true),
            AttackLabel::Hijacked => {
                control.steer = STEER_OVERRIDE.sample(&mut self.rng);
                control.throttle = THROTTLE_OVERRIDE.sample(&mut self.rng);
                control.brake = BRAKE_OVERRIDE.sample(&mut self.rng);
                state.control_override.set(true);
            }
            AttackLabel::Normal => {
                state.gps_noise.set(false);
                state.control_override.set(false);
            }
        }
    }
}
