use std::path::{Path, PathBuf};

use log::info;
use rand::Rng;
use rand_pcg::Pcg64Mcg;

use avgen_core::client::{Location, SensorHandle, SimulatorWorld, Transform};
use avgen_models::attack::{AttackSelector, AttackState};
use avgen_models::net::NetworkSynthesizer;
use avgen_models::sensor::{GnssMonitor, ImuMonitor, SensorFeed};
use avgen_output::logger::initiate_logger;
use avgen_output::result::Results;

use crate::capture::CaptureLoop;
use crate::simulation::config::{BaseConfig, BaseConfigReader};
use crate::world::session::SimWorld;

// Both sensors mount on the vehicle roof.
const SENSOR_MOUNT: Transform = Transform {
    location: Location {
        x: 0.0,
        y: 0.0,
        z: 2.0,
    },
    yaw: 0.0,
};

pub struct CaptureBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
}

impl CaptureBuilder {
    pub fn new(base_config_file: &str) -> Self {
        if !Path::new(base_config_file).exists() {
            panic!("Configuration file is not found.");
        }
        let config_path = Path::new(base_config_file)
            .parent()
            .unwrap_or_else(|| {
                panic!("Invalid directory for the configuration file");
            })
            .to_path_buf();

        let config_reader = BaseConfigReader::new(base_config_file);
        match config_reader.parse() {
            Ok(base_config) => Self {
                base_config,
                config_path,
            },
            Err(e) => {
                panic!("Error while parsing the base configuration file: {}", e);
            }
        }
    }

    pub fn build(&mut self) -> CaptureLoop<SimWorld> {
        initiate_logger(
            &self.config_path,
            &self.base_config.log_settings,
            Some(self.base_config.output_settings.scenario_id),
        );

        let settings = self.base_config.capture_settings.clone();
        info!("Building the capture world for scenario {}", settings.scenario);
        let mut world = SimWorld::new(self.base_config.world_settings);

        let vehicle_bp = world.blueprints().filter("model3")[0].clone();
        let spawn_points = world.spawn_points();
        let mut spawn_rng = Pcg64Mcg::new((settings.seed + 3) as u128);
        let at = spawn_points[spawn_rng.gen_range(0..spawn_points.len())];
        let vehicle = world
            .spawn_vehicle(&vehicle_bp, at)
            .expect("failed to spawn the vehicle");

        let gnss_bp = world
            .blueprints()
            .find("sensor.other.gnss")
            .expect("gnss blueprint missing")
            .clone();
        let imu_bp = world
            .blueprints()
            .find("sensor.other.imu")
            .expect("imu blueprint missing")
            .clone();
        let gnss = world
            .attach_gnss(&gnss_bp, SENSOR_MOUNT)
            .expect("failed to attach the gnss sensor");
        let imu = world
            .attach_imu(&imu_bp, SENSOR_MOUNT)
            .expect("failed to attach the imu sensor");

        let feed = SensorFeed::new();
        let attack_state = AttackState::new();
        let mut gnss_monitor =
            GnssMonitor::new(&feed, attack_state.gps_noise.clone(), settings.seed + 2);
        gnss.listen(Box::new(move |fix| gnss_monitor.update(fix)));
        let mut imu_monitor = ImuMonitor::new(&feed);
        imu.listen(Box::new(move |sample| imu_monitor.update(sample)));

        info!("Building the output writers...");
        let results = Results::new(&self.base_config.output_settings);

        CaptureLoop::builder()
            .world(world)
            .vehicle(vehicle)
            .gnss(gnss)
            .imu(imu)
            .feed(feed)
            .attack_state(attack_state)
            .selector(AttackSelector::new(settings.seed))
            .synthesizer(NetworkSynthesizer::new(settings.seed + 1))
            .results(results)
            .sample_count(settings.sample_count)
            .tick_interval(settings.tick_interval)
            .output_interval(self.base_config.output_settings.output_interval)
            .build()
    }
}
