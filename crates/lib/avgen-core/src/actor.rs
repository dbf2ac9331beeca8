use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::Deserialize;

/// A unique ID assigned by the world to every spawned actor.
#[derive(Deserialize, Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct ActorId(u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ActorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<u64>()?;
        Ok(Self(id))
    }
}

impl From<u64> for ActorId {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl ActorId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// The kind of a spawned actor. The capture pipeline manages one vehicle and
/// the two sensors riding on it.
#[derive(Deserialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
pub enum ActorKind {
    #[default]
    Vehicle,
    GnssSensor,
    ImuSensor,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorKind::Vehicle => write!(f, "Vehicle"),
            ActorKind::GnssSensor => write!(f, "GnssSensor"),
            ActorKind::ImuSensor => write!(f, "ImuSensor"),
        }
    }
}
