use std::sync::{Arc, Mutex};

use log::debug;

use avgen_core::actor::ActorId;
use avgen_core::client::{ClientError, VehicleControl, VehicleHandle, Velocity};
use avgen_models::kinematics::KinematicModel;

/// Vehicle state shared between the handle and the world's stepping thread.
#[derive(Debug)]
pub struct VehicleState {
    pub model: KinematicModel,
    pub control: VehicleControl,
    pub alive: bool,
}

/// Handle to the embedded vehicle. Every read and write goes through the
/// shared state, so the handle always reflects what the stepping thread is
/// integrating.
pub struct SimVehicle {
    id: ActorId,
    state: Arc<Mutex<VehicleState>>,
}

impl SimVehicle {
    pub fn new(id: ActorId, state: Arc<Mutex<VehicleState>>) -> Self {
        Self { id, state }
    }
}

impl VehicleHandle for SimVehicle {
    fn id(&self) -> ActorId {
        self.id
    }

    fn control(&self) -> Result<VehicleControl, ClientError> {
        let state = self.state.lock().expect("vehicle state lock poisoned");
        Ok(state.control)
    }

    fn apply_control(&self, control: VehicleControl) -> Result<(), ClientError> {
        let mut state = self.state.lock().expect("vehicle state lock poisoned");
        state.control = control;
        Ok(())
    }

    fn velocity(&self) -> Result<Velocity, ClientError> {
        let state = self.state.lock().expect("vehicle state lock poisoned");
        Ok(state.model.velocity())
    }

    fn destroy(&self) {
        let mut state = self.state.lock().expect("vehicle state lock poisoned");
        state.alive = false;
        debug!("Destroyed vehicle {}", self.id);
    }
}
