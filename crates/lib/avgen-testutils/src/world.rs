use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use avgen_core::actor::ActorId;
use avgen_core::client::{
    Blueprint, BlueprintLibrary, ClientError, GnssFix, ImuSample, Location, SensorHandle,
    SimulatorWorld, Transform, VehicleControl, VehicleHandle, Velocity,
};

/// Call counters shared between the mock actors and the test body. Tests
/// clone this before the world moves into the capture loop.
#[derive(Clone, Debug, Default)]
pub struct WorldCounters {
    pub vehicle_spawns: Arc<AtomicU32>,
    pub vehicle_destroys: Arc<AtomicU32>,
    pub gnss_destroys: Arc<AtomicU32>,
    pub imu_destroys: Arc<AtomicU32>,
    pub shutdowns: Arc<AtomicU32>,
    pub control_applies: Arc<AtomicU32>,
    pub velocity_reads: Arc<AtomicU32>,
}

impl WorldCounters {
    pub fn count(counter: &Arc<AtomicU32>) -> u32 {
        counter.load(Ordering::Relaxed)
    }
}

type Callbacks<T> = Arc<Mutex<Vec<Box<dyn FnMut(T) + Send>>>>;

/// Handles to the mock sensor streams, usable after the world has been
/// consumed by the capture loop.
#[derive(Clone)]
pub struct MockStreams {
    gnss: Callbacks<GnssFix>,
    imu: Callbacks<ImuSample>,
}

impl MockStreams {
    pub fn emit_gnss(&self, fix: GnssFix) {
        for callback in self.gnss.lock().expect("gnss callbacks poisoned").iter_mut() {
            callback(fix);
        }
    }

    pub fn emit_imu(&self, sample: ImuSample) {
        for callback in self.imu.lock().expect("imu callbacks poisoned").iter_mut() {
            callback(sample);
        }
    }
}

/// A vehicle whose reported control never drifts: `control()` always returns
/// the scripted baseline, while every `apply_control` is recorded for
/// inspection. `velocity()` can be scripted to fail on its n-th read.
pub struct MockVehicle {
    id: ActorId,
    baseline: VehicleControl,
    velocity: Velocity,
    fail_velocity_at: Option<u32>,
    counters: WorldCounters,
    applied: Arc<Mutex<Vec<VehicleControl>>>,
}

impl VehicleHandle for MockVehicle {
    fn id(&self) -> ActorId {
        self.id
    }

    fn control(&self) -> Result<VehicleControl, ClientError> {
        Ok(self.baseline)
    }

    fn apply_control(&self, control: VehicleControl) -> Result<(), ClientError> {
        self.counters.control_applies.fetch_add(1, Ordering::Relaxed);
        self.applied
            .lock()
            .expect("applied controls poisoned")
            .push(control);
        Ok(())
    }

    fn velocity(&self) -> Result<Velocity, ClientError> {
        let reads = self.counters.velocity_reads.fetch_add(1, Ordering::Relaxed) + 1;
        if Some(reads) == self.fail_velocity_at {
            return Err("injected velocity fault".into());
        }
        Ok(self.velocity)
    }

    fn destroy(&self) {
        self.counters.vehicle_destroys.fetch_add(1, Ordering::Relaxed);
    }
}

pub struct MockSensor<T> {
    id: ActorId,
    callbacks: Callbacks<T>,
    destroys: Arc<AtomicU32>,
}

impl<T: Send> SensorHandle<T> for MockSensor<T> {
    fn id(&self) -> ActorId {
        self.id
    }

    fn listen(&self, callback: Box<dyn FnMut(T) + Send>) {
        self.callbacks
            .lock()
            .expect("sensor callbacks poisoned")
            .push(callback);
    }

    fn destroy(&self) {
        self.destroys.fetch_add(1, Ordering::Relaxed);
    }
}

/// An in-memory world with scripted responses and full call accounting.
pub struct MockWorld {
    pub counters: WorldCounters,
    pub baseline: VehicleControl,
    pub velocity: Velocity,
    pub fail_velocity_at: Option<u32>,
    pub applied: Arc<Mutex<Vec<VehicleControl>>>,
    blueprints: BlueprintLibrary,
    gnss_callbacks: Callbacks<GnssFix>,
    imu_callbacks: Callbacks<ImuSample>,
    next_actor: u64,
}

impl MockWorld {
    pub fn new(baseline: VehicleControl, velocity: Velocity) -> Self {
        Self {
            counters: WorldCounters::default(),
            baseline,
            velocity,
            fail_velocity_at: None,
            applied: Arc::new(Mutex::new(Vec::new())),
            blueprints: BlueprintLibrary::from_ids(&[
                "vehicle.tesla.model3",
                "sensor.other.gnss",
                "sensor.other.imu",
            ]),
            gnss_callbacks: Arc::new(Mutex::new(Vec::new())),
            imu_callbacks: Arc::new(Mutex::new(Vec::new())),
            next_actor: 0,
        }
    }

    pub fn streams(&self) -> MockStreams {
        MockStreams {
            gnss: self.gnss_callbacks.clone(),
            imu: self.imu_callbacks.clone(),
        }
    }

    fn next_id(&mut self) -> ActorId {
        self.next_actor += 1;
        ActorId::from(self.next_actor)
    }
}

impl SimulatorWorld for MockWorld {
    type V = MockVehicle;
    type Gnss = MockSensor<GnssFix>;
    type Imu = MockSensor<ImuSample>;

    fn blueprints(&self) -> &BlueprintLibrary {
        &self.blueprints
    }

    fn spawn_points(&self) -> Vec<Transform> {
        vec![
            Transform::default(),
            Transform {
                location: Location {
                    x: 50.0,
                    y: 0.0,
                    z: 0.0,
                },
                yaw: 90.0,
            },
        ]
    }

    fn spawn_vehicle(
        &mut self,
        _blueprint: &Blueprint,
        _at: Transform,
    ) -> Result<Self::V, ClientError> {
        self.counters.vehicle_spawns.fetch_add(1, Ordering::Relaxed);
        Ok(MockVehicle {
            id: self.next_id(),
            baseline: self.baseline,
            velocity: self.velocity,
            fail_velocity_at: self.fail_velocity_at,
            counters: self.counters.clone(),
            applied: self.applied.clone(),
        })
    }

    fn attach_gnss(
        &mut self,
        _blueprint: &Blueprint,
        _relative: Transform,
    ) -> Result<Self::Gnss, ClientError> {
        Ok(MockSensor {
            id: self.next_id(),
            callbacks: self.gnss_callbacks.clone(),
            destroys: self.counters.gnss_destroys.clone(),
        })
    }

    fn attach_imu(
        &mut self,
        _blueprint: &Blueprint,
        _relative: Transform,
    ) -> Result<Self::Imu, ClientError> {
        Ok(MockSensor {
            id: self.next_id(),
            callbacks: self.imu_callbacks.clone(),
            destroys: self.counters.imu_destroys.clone(),
        })
    }

    fn shutdown(self) {
        self.counters.shutdowns.fetch_add(1, Ordering::Relaxed);
    }
}
