use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use log::info;
use serde::Deserialize;

use avgen_core::actor::{ActorId, ActorKind};
use avgen_core::client::{
    Blueprint, BlueprintLibrary, ClientError, GnssFix, ImuSample, Location, SimulatorWorld,
    Transform, VehicleControl,
};
use avgen_core::hashbrown::HashMap;
use avgen_core::tick::TimeMS;
use avgen_models::kinematics::KinematicModel;

use crate::world::sensors::{SensorChannel, SimGnss, SimImu, SimSensor};
use crate::world::vehicle::{SimVehicle, VehicleState};

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct WorldSettings {
    pub step_interval: TimeMS,
    pub anchor_latitude: f64,
    pub anchor_longitude: f64,
}

const CATALOG: [&str; 5] = [
    "vehicle.tesla.model3",
    "vehicle.audi.tt",
    "vehicle.nissan.patrol",
    "sensor.other.gnss",
    "sensor.other.imu",
];

/// The embedded simulator session. Owns the vehicle state and a background
/// stepping thread that integrates the motion model and fires the sensor
/// subscribers on the world's own cadence, independent of the capture
/// loop's pacing.
pub struct SimWorld {
    settings: WorldSettings,
    blueprints: BlueprintLibrary,
    actors: HashMap<ActorId, ActorKind>,
    state: Option<Arc<Mutex<VehicleState>>>,
    gnss_channel: SensorChannel<GnssFix>,
    imu_channel: SensorChannel<ImuSample>,
    stepper: Option<thread::JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    next_actor: u64,
}

impl SimWorld {
    pub fn new(settings: WorldSettings) -> Self {
        Self {
            settings,
            blueprints: BlueprintLibrary::from_ids(&CATALOG),
            actors: HashMap::new(),
            state: None,
            gnss_channel: SensorChannel::new(),
            imu_channel: SensorChannel::new(),
            stepper: None,
            stop: Arc::new(AtomicBool::new(false)),
            next_actor: 0,
        }
    }

    fn next_id(&mut self, kind: ActorKind) -> ActorId {
        self.next_actor += 1;
        let id = ActorId::from(self.next_actor);
        self.actors.insert(id, kind);
        info!("Spawned {} with id {}", kind, id);
        id
    }

    fn start_stepper(&mut self) {
        let state = self.state.clone().expect("stepper requires a vehicle");
        let gnss = self.gnss_channel.clone();
        let imu = self.imu_channel.clone();
        let stop = self.stop.clone();
        let interval = self.settings.step_interval.as_duration();
        let dt = self.settings.step_interval.as_secs_f64();
        self.stepper = Some(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let (fix, sample) = {
                    let mut locked = state.lock().expect("vehicle state lock poisoned");
                    if locked.alive {
                        let control = locked.control;
                        locked.model.step(&control, dt);
                    }
                    (locked.model.gnss_fix(), locked.model.imu_sample())
                };
                gnss.fire(fix);
                imu.fire(sample);
                thread::sleep(interval);
            }
        }));
    }
}

impl SimulatorWorld for SimWorld {
    type V = SimVehicle;
    type Gnss = SimGnss;
    type Imu = SimImu;

    fn blueprints(&self) -> &BlueprintLibrary {
        &self.blueprints
    }

    fn spawn_points(&self) -> Vec<Transform> {
        let spacing = 50.0;
        (0..4)
            .map(|i| Transform {
                location: Location {
                    x: spacing * i as f64,
                    y: spacing * (i % 2) as f64,
                    z: 0.0,
                },
                yaw: 90.0 * i as f64,
            })
            .collect()
    }

    fn spawn_vehicle(
        &mut self,
        blueprint: &Blueprint,
        at: Transform,
    ) -> Result<Self::V, ClientError> {
        if self.state.is_some() {
            return Err("a vehicle is already spawned in this world".into());
        }
        if self.blueprints.find(&blueprint.id).is_none() {
            return Err(format!("unknown blueprint: {}", blueprint.id).into());
        }
        let anchor = GnssFix {
            latitude: self.settings.anchor_latitude,
            longitude: self.settings.anchor_longitude,
        };
        let state = Arc::new(Mutex::new(VehicleState {
            model: KinematicModel::new(at, anchor),
            control: VehicleControl::default(),
            alive: true,
        }));
        self.state = Some(state.clone());
        let id = self.next_id(ActorKind::Vehicle);
        self.start_stepper();
        Ok(SimVehicle::new(id, state))
    }

    fn attach_gnss(
        &mut self,
        blueprint: &Blueprint,
        _relative: Transform,
    ) -> Result<Self::Gnss, ClientError> {
        if self.blueprints.find(&blueprint.id).is_none() {
            return Err(format!("unknown blueprint: {}", blueprint.id).into());
        }
        if self.state.is_none() {
            return Err("no parent vehicle to attach to".into());
        }
        let id = self.next_id(ActorKind::GnssSensor);
        Ok(SimSensor::new(
            id,
            ActorKind::GnssSensor,
            self.gnss_channel.clone(),
        ))
    }

    fn attach_imu(
        &mut self,
        blueprint: &Blueprint,
        _relative: Transform,
    ) -> Result<Self::Imu, ClientError> {
        if self.blueprints.find(&blueprint.id).is_none() {
            return Err(format!("unknown blueprint: {}", blueprint.id).into());
        }
        if self.state.is_none() {
            return Err("no parent vehicle to attach to".into());
        }
        let id = self.next_id(ActorKind::ImuSensor);
        Ok(SimSensor::new(
            id,
            ActorKind::ImuSensor,
            self.imu_channel.clone(),
        ))
    }

    fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.stepper.take() {
            handle.join().expect("world stepping thread panicked");
        }
        info!("World shut down with {} actors spawned", self.actors.len());
    }
}
