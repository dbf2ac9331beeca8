use avgen_core::client::{GnssFix, ImuSample, Transform, VehicleControl, Velocity};

const MAX_ACCEL_MPS2: f64 = 3.5;
const MAX_BRAKE_MPS2: f64 = 8.0;
const DRAG_PER_S: f64 = 0.08;
const MAX_YAW_RATE_RADS: f64 = 0.6;
const YAW_SPEED_SCALE_MPS: f64 = 5.0;
const METERS_PER_DEG_LAT: f64 = 111_320.0;
const GRAVITY_MPS2: f64 = 9.81;

/// Single-track motion model backing the embedded world's vehicle. Throttle
/// and brake command longitudinal acceleration against drag, steer commands
/// a yaw rate that saturates with speed, and local meters are mapped to
/// geodetic coordinates around a fixed anchor.
#[derive(Debug, Clone)]
pub struct KinematicModel {
    x: f64,
    y: f64,
    heading: f64,
    speed: f64,
    accel_long: f64,
    accel_lat: f64,
    anchor: GnssFix,
}

impl KinematicModel {
    pub fn new(at: Transform, anchor: GnssFix) -> Self {
        Self {
            x: at.location.x,
            y: at.location.y,
            heading: at.yaw.to_radians(),
            speed: 0.0,
            accel_long: 0.0,
            accel_lat: 0.0,
            anchor,
        }
    }

    /// Advance the model by `dt` seconds under the given control.
    pub fn step(&mut self, control: &VehicleControl, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let commanded = control.throttle * MAX_ACCEL_MPS2
            - control.brake * MAX_BRAKE_MPS2
            - DRAG_PER_S * self.speed;
        let next_speed = (self.speed + commanded * dt).max(0.0);
        let yaw_rate = control.steer
            * MAX_YAW_RATE_RADS
            * (next_speed / (next_speed + YAW_SPEED_SCALE_MPS));

        self.accel_long = (next_speed - self.speed) / dt;
        self.accel_lat = next_speed * yaw_rate;
        self.speed = next_speed;
        self.heading += yaw_rate * dt;
        self.x += self.speed * self.heading.cos() * dt;
        self.y += self.speed * self.heading.sin() * dt;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn velocity(&self) -> Velocity {
        Velocity {
            x: self.speed * self.heading.cos(),
            y: self.speed * self.heading.sin(),
            z: 0.0,
        }
    }

    pub fn gnss_fix(&self) -> GnssFix {
        let lat_radians = self.anchor.latitude.to_radians();
        GnssFix {
            latitude: self.anchor.latitude + self.y / METERS_PER_DEG_LAT,
            longitude: self.anchor.longitude + self.x / (METERS_PER_DEG_LAT * lat_radians.cos()),
        }
    }

    pub fn imu_sample(&self) -> ImuSample {
        ImuSample {
            accel_x: self.accel_long,
            accel_y: self.accel_lat,
            accel_z: GRAVITY_MPS2,
        }
    }
}
