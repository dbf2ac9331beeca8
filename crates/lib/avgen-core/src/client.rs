use crate::actor::ActorId;

/// Errors surfaced by the world seam. Any of these aborts the capture loop;
/// there is no retry and no partial row.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A pose in the world. Sensors are attached to their parent with a relative
/// transform; vehicles spawn at one of the map's spawn transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub location: Location,
    pub yaw: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    pub id: String,
}

impl Blueprint {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// The catalog of actor blueprints the world can spawn.
#[derive(Clone, Debug, Default)]
pub struct BlueprintLibrary {
    catalog: Vec<Blueprint>,
}

impl BlueprintLibrary {
    pub fn from_ids(ids: &[&str]) -> Self {
        Self {
            catalog: ids.iter().map(|id| Blueprint::new(id)).collect(),
        }
    }

    /// All blueprints whose id contains the given pattern, in catalog order.
    pub fn filter(&self, pattern: &str) -> Vec<&Blueprint> {
        self.catalog
            .iter()
            .filter(|blueprint| blueprint.id.contains(pattern))
            .collect()
    }

    /// The blueprint with exactly the given id, if present.
    pub fn find(&self, id: &str) -> Option<&Blueprint> {
        self.catalog.iter().find(|blueprint| blueprint.id == id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleControl {
    pub throttle: f64,
    pub steer: f64,
    pub brake: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Velocity {
    /// Speed over the ground plane, ignoring the vertical component.
    pub fn planar_speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// One position reading from the GNSS stream.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GnssFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// One accelerometer reading from the IMU stream, in m/s^2.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImuSample {
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
}

impl ImuSample {
    /// Magnitude of the acceleration over the ground plane.
    pub fn planar_magnitude(&self) -> f64 {
        (self.accel_x * self.accel_x + self.accel_y * self.accel_y).sqrt()
    }
}

/// A spawned vehicle. Control reads and writes go through the world on every
/// call so the handle always reflects the world's current state.
pub trait VehicleHandle: Send {
    fn id(&self) -> ActorId;
    fn control(&self) -> Result<VehicleControl, ClientError>;
    fn apply_control(&self, control: VehicleControl) -> Result<(), ClientError>;
    fn velocity(&self) -> Result<Velocity, ClientError>;
    fn destroy(&self);
}

/// A spawned sensor. `listen` registers a fire-and-forget callback invoked on
/// the world's own cadence; there is no queue and no backpressure, the
/// subscriber keeps only whatever it stores from the latest invocation.
pub trait SensorHandle<T>: Send {
    fn id(&self) -> ActorId;
    fn listen(&self, callback: Box<dyn FnMut(T) + Send>);
    fn destroy(&self);
}

/// The simulator session. The capture pipeline consumes this capability set
/// and exposes nothing back beyond control writes and actor lifecycle calls.
pub trait SimulatorWorld {
    type V: VehicleHandle;
    type Gnss: SensorHandle<GnssFix>;
    type Imu: SensorHandle<ImuSample>;

    fn blueprints(&self) -> &BlueprintLibrary;
    fn spawn_points(&self) -> Vec<Transform>;
    fn spawn_vehicle(&mut self, blueprint: &Blueprint, at: Transform)
        -> Result<Self::V, ClientError>;
    fn attach_gnss(
        &mut self,
        blueprint: &Blueprint,
        relative: Transform,
    ) -> Result<Self::Gnss, ClientError>;
    fn attach_imu(
        &mut self,
        blueprint: &Blueprint,
        relative: Transform,
    ) -> Result<Self::Imu, ClientError>;
    fn shutdown(self);
}
