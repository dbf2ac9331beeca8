use chrono::Utc;
use log::{debug, info};
use typed_builder::TypedBuilder;

use avgen_core::client::{ClientError, GnssFix, SensorHandle, SimulatorWorld, VehicleHandle};
use avgen_core::tick::TimeMS;
use avgen_models::attack::{AttackSelector, AttackState};
use avgen_models::net::NetworkSynthesizer;
use avgen_models::sensor::SensorFeed;
use avgen_output::result::Results;
use avgen_output::tables::dataset::TickRecord;

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// The generation loop. Each trigger produces exactly one dataset row from
/// the simulator-reported control, the shared sensor cells and the
/// synthesized link metrics for the tick's label.
#[derive(TypedBuilder)]
pub struct CaptureLoop<W>
where
    W: SimulatorWorld,
{
    pub world: W,
    pub vehicle: W::V,
    pub gnss: W::Gnss,
    pub imu: W::Imu,
    pub feed: SensorFeed,
    pub attack_state: AttackState,
    pub selector: AttackSelector,
    pub synthesizer: NetworkSynthesizer,
    pub results: Results,
    pub sample_count: u32,
    pub tick_interval: TimeMS,
    pub output_interval: TimeMS,
    #[builder(default = TimeMS::default())]
    pub now: TimeMS,
    #[builder(default = TimeMS::default())]
    pub output_step: TimeMS,
    #[builder(default)]
    pub emitted: u32,
}

impl<W> CaptureLoop<W>
where
    W: SimulatorWorld,
{
    pub fn initialize(&mut self) {
        self.output_step = self.output_interval;
        info!(
            "Starting capture of {} samples at {} ms per tick",
            self.sample_count, self.tick_interval
        );
    }

    pub fn is_done(&self) -> bool {
        self.emitted >= self.sample_count
    }

    pub fn pace(&self) -> std::time::Duration {
        self.tick_interval.as_duration()
    }

    /// One tick. The first error aborts the loop; no retry, no partial row.
    pub fn trigger(&mut self) -> Result<(), ClientError> {
        let mut control = self.vehicle.control()?;
        let velocity = self.vehicle.velocity()?;
        let speed = velocity.planar_speed();

        let label = self.selector.draw();
        self.selector
            .perturb(label, &mut control, &self.attack_state);
        self.vehicle.apply_control(control)?;

        let network = self.synthesizer.synthesize(label);
        let fix = GnssFix {
            latitude: self.feed.latitude.load(),
            longitude: self.feed.longitude.load(),
        };
        let record = TickRecord::builder()
            .timestamp(epoch_seconds())
            .latitude(fix.latitude)
            .longitude(fix.longitude)
            .speed(speed)
            .acceleration(self.feed.acceleration.load())
            .throttle(control.throttle)
            .steering(control.steer)
            .brake(control.brake)
            .network(network)
            .attack(label)
            .build();
        debug!("Tick {} labeled {}", self.emitted, label);

        if let Some(writer) = &mut self.results.dataset {
            writer.add_row(record);
        }
        if let Some(writer) = &mut self.results.positions {
            writer.add_data(self.now, fix, speed);
        }

        self.emitted += 1;
        self.now += self.tick_interval;
        if self.now >= self.output_step {
            self.results.write_to_file();
            self.output_step += self.output_interval;
        }
        Ok(())
    }

    /// Flushes and closes the output tables and destroys the spawned actors.
    /// Runs on the success and the fault path alike.
    pub fn terminate(mut self) {
        self.results.write_to_file();
        self.results.close_files();
        self.gnss.destroy();
        self.imu.destroy();
        self.vehicle.destroy();
        self.world.shutdown();
        info!("Capture complete after {} rows", self.emitted);
    }
}
