use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A shared f64 value cell written by sensor callbacks and read by the
/// capture loop. Stores the bit pattern in an atomic with relaxed ordering:
/// readers may observe a stale value but never a torn one. Last written
/// value wins at row-emission time.
#[derive(Debug, Default)]
pub struct SensorCell(AtomicU64);

impl SensorCell {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// A shared boolean toggled by the capture loop and observed by sensor
/// callbacks. No ordering guarantee relative to tick boundaries; callbacks
/// sample it whenever they fire.
#[derive(Debug, Default)]
pub struct AttackFlag(AtomicBool);

impl AttackFlag {
    pub fn set(&self, active: bool) {
        self.0.store(active, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
