use std::sync::Arc;

use avgen_core::cell::{AttackFlag, SensorCell};
use avgen_core::client::{GnssFix, ImuSample};

use crate::dist::{RangeSampler, UniformRange};

pub const GPS_NOISE: UniformRange = UniformRange::new(-0.0005, 0.0005);

/// The latest-value sensor state shared between the world's callbacks and
/// the capture loop. No queue: each callback overwrites the previous value.
#[derive(Clone, Debug, Default)]
pub struct SensorFeed {
    pub latitude: Arc<SensorCell>,
    pub longitude: Arc<SensorCell>,
    pub acceleration: Arc<SensorCell>,
}

impl SensorFeed {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Subscriber for the GNSS stream. Each fix updates the position cells;
/// while the GPS attack flag is raised, each coordinate is offset with an
/// independent uniform draw before it is stored.
pub struct GnssMonitor {
    latitude: Arc<SensorCell>,
    longitude: Arc<SensorCell>,
    gps_noise: Arc<AttackFlag>,
    noise: RangeSampler,
}

impl GnssMonitor {
    pub fn new(feed: &SensorFeed, gps_noise: Arc<AttackFlag>, seed: u64) -> Self {
        Self {
            latitude: feed.latitude.clone(),
            longitude: feed.longitude.clone(),
            gps_noise,
            noise: RangeSampler::new(GPS_NOISE, seed),
        }
    }

    pub fn update(&mut self, fix: GnssFix) {
        let mut latitude = fix.latitude;
        let mut longitude = fix.longitude;
        if self.gps_noise.is_set() {
            latitude += self.noise.sample();
            longitude += self.noise.sample();
        }
        self.latitude.store(latitude);
        self.longitude.store(longitude);
    }
}

/// Subscriber for the IMU stream. Stores the planar acceleration magnitude
/// recomputed from the latest raw sample.
pub struct ImuMonitor {
    acceleration: Arc<SensorCell>,
}

impl ImuMonitor {
    pub fn new(feed: &SensorFeed) -> Self {
        Self {
            acceleration: feed.acceleration.clone(),
        }
    }

    pub fn update(&mut self, sample: ImuSample) {
        self.acceleration.store(sample.planar_magnitude());
    }
}
