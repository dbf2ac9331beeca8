use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;

use avgen_core::actor::{ActorId, ActorKind};
use avgen_core::client::{GnssFix, ImuSample, SensorHandle};

/// Subscription channel between the stepping thread and a sensor's
/// listeners. Destroying the sensor silences the channel; registered
/// callbacks are simply never invoked again.
#[derive(Clone)]
pub struct SensorChannel<T> {
    callbacks: Arc<Mutex<Vec<Box<dyn FnMut(T) + Send>>>>,
    active: Arc<AtomicBool>,
}

impl<T: Clone> SensorChannel<T> {
    pub fn new() -> Self {
        Self {
            callbacks: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn fire(&self, value: T) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        for callback in self
            .callbacks
            .lock()
            .expect("sensor callbacks poisoned")
            .iter_mut()
        {
            callback(value.clone());
        }
    }
}

impl<T: Clone> Default for SensorChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to an embedded sensor actor.
pub struct SimSensor<T> {
    id: ActorId,
    kind: ActorKind,
    channel: SensorChannel<T>,
}

impl<T> SimSensor<T> {
    pub fn new(id: ActorId, kind: ActorKind, channel: SensorChannel<T>) -> Self {
        Self { id, kind, channel }
    }
}

impl<T: Clone + Send> SensorHandle<T> for SimSensor<T> {
    fn id(&self) -> ActorId {
        self.id
    }

    fn listen(&self, callback: Box<dyn FnMut(T) + Send>) {
        self.channel
            .callbacks
            .lock()
            .expect("sensor callbacks poisoned")
            .push(callback);
    }

    fn destroy(&self) {
        self.channel.active.store(false, Ordering::Relaxed);
        debug!("Destroyed {} {}", self.kind, self.id);
    }
}

pub type SimGnss = SimSensor<GnssFix>;
pub type SimImu = SimSensor<ImuSample>;
