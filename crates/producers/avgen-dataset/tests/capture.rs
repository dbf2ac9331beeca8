use std::fs;
use std::path::PathBuf;

use avgen_core::client::{GnssFix, ImuSample, SensorHandle, SimulatorWorld, VehicleControl, Velocity};
use avgen_core::tick::TimeMS;
use avgen_dataset::capture::CaptureLoop;
use avgen_dataset::runner::run_capture;
use avgen_models::attack::{AttackLabel, AttackSelector, AttackState};
use avgen_models::net::NetworkSynthesizer;
use avgen_models::sensor::{GnssMonitor, ImuMonitor, SensorFeed};
use avgen_output::result::{OutputSettings, OutputType, Outputs, Results};
use avgen_testutils::world::{MockWorld, WorldCounters};

const HEADER: &str = "Timestamp,Latitude,Longitude,Speed,Acceleration,Throttle,Steering,Brake,\
Network_Latency,Packet_Loss,Throughput,Jitter,Bandwidth_Utilization,Attack_Type";

const BASELINE: VehicleControl = VehicleControl {
    throttle: 0.3,
    steer: -0.1,
    brake: 0.0,
};

fn build_capture(
    name: &str,
    seed: u64,
    samples: u32,
    fail_velocity_at: Option<u32>,
) -> (CaptureLoop<MockWorld>, WorldCounters, PathBuf) {
    let out_dir = std::env::temp_dir().join(format!(
        "avgen_capture_{}_{}_{}",
        name,
        seed,
        std::process::id()
    ));
    let mut world = MockWorld::new(
        BASELINE,
        Velocity {
            x: 3.0,
            y: 4.0,
            z: 0.0,
        },
    );
    world.fail_velocity_at = fail_velocity_at;
    let counters = world.counters.clone();
    let streams = world.streams();

    let vehicle_bp = world.blueprints().filter("model3")[0].clone();
    let at = world.spawn_points()[0];
    let vehicle = world.spawn_vehicle(&vehicle_bp, at).expect("spawn failed");
    let gnss_bp = world
        .blueprints()
        .find("sensor.other.gnss")
        .expect("missing gnss blueprint")
        .clone();
    let imu_bp = world
        .blueprints()
        .find("sensor.other.imu")
        .expect("missing imu blueprint")
        .clone();
    let gnss = world.attach_gnss(&gnss_bp, at).expect("attach failed");
    let imu = world.attach_imu(&imu_bp, at).expect("attach failed");

    let feed = SensorFeed::new();
    let attack_state = AttackState::new();
    let mut gnss_monitor = GnssMonitor::new(&feed, attack_state.gps_noise.clone(), seed + 2);
    gnss.listen(Box::new(move |fix| gnss_monitor.update(fix)));
    let mut imu_monitor = ImuMonitor::new(&feed);
    imu.listen(Box::new(move |sample| imu_monitor.update(sample)));

    // Seed the shared cells through the callback path before the loop runs.
    streams.emit_gnss(GnssFix {
        latitude: 48.25,
        longitude: 11.625,
    });
    streams.emit_imu(ImuSample {
        accel_x: 0.6,
        accel_y: 0.8,
        accel_z: 9.81,
    });

    let output_settings = OutputSettings {
        output_interval: TimeMS::from(1000u64),
        output_path: out_dir.to_string_lossy().to_string(),
        outputs: vec![Outputs {
            output_type: OutputType::Dataset,
            output_filename: "dataset.csv".to_string(),
        }],
        scenario_id: 1,
    };
    let results = Results::new(&output_settings);
    let csv_path = out_dir.join("1").join("files").join("dataset.csv");

    let capture = CaptureLoop::builder()
        .world(world)
        .vehicle(vehicle)
        .gnss(gnss)
        .imu(imu)
        .feed(feed)
        .attack_state(attack_state)
        .selector(AttackSelector::new(seed))
        .synthesizer(NetworkSynthesizer::new(seed + 1))
        .results(results)
        .sample_count(samples)
        .tick_interval(TimeMS::from(0u64))
        .output_interval(TimeMS::from(1000u64))
        .build();
    (capture, counters, csv_path)
}

fn read_rows(csv_path: &PathBuf) -> Vec<String> {
    let contents = fs::read_to_string(csv_path).expect("failed to read dataset");
    contents.lines().map(|line| line.to_string()).collect()
}

fn label_of(row: &str) -> AttackLabel {
    match row.split(',').nth(13).expect("row has no label") {
        "Normal" => AttackLabel::Normal,
        "DoS_Attack" => AttackLabel::DoS,
        "Hijacked" => AttackLabel::Hijacked,
        other => panic!("unexpected label: {}", other),
    }
}

fn field(row: &str, index: usize) -> f64 {
    row.split(',')
        .nth(index)
        .expect("missing field")
        .parse()
        .expect("field is not a number")
}

#[test]
fn test_capture_emits_header_and_all_rows() {
    let (capture, counters, csv_path) = build_capture("rows", 42, 100, None);
    run_capture(capture).expect("capture failed");

    let lines = read_rows(&csv_path);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 101);

    assert_eq!(WorldCounters::count(&counters.vehicle_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.gnss_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.imu_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.shutdowns), 1);
    assert_eq!(WorldCounters::count(&counters.control_applies), 100);
    fs::remove_file(&csv_path).expect("failed to remove temp file");
}

#[test]
fn test_rows_respect_label_semantics() {
    let (capture, _counters, csv_path) = build_capture("labels", 42, 300, None);
    run_capture(capture).expect("capture failed");

    let lines = read_rows(&csv_path);
    let mut seen = [false; 3];
    for row in &lines[1..] {
        let label = label_of(row);
        let ranges = NetworkSynthesizer::ranges(label);
        assert!(ranges.latency.contains(field(row, 8)));
        assert!(ranges.packet_loss.contains(field(row, 9)));
        assert!(ranges.throughput.contains(field(row, 10)));
        assert!(ranges.jitter.contains(field(row, 11)));
        assert!(ranges.bandwidth_util.contains(field(row, 12)));

        // The mock reports the same control every tick, so any non-hijacked
        // row must carry it through unchanged.
        match label {
            AttackLabel::Hijacked => {
                seen[2] = true;
                assert!((-1.0..=1.0).contains(&field(row, 6)));
                assert!((0.0..=1.0).contains(&field(row, 5)));
                assert!((0.0..=0.5).contains(&field(row, 7)));
            }
            AttackLabel::Normal => {
                seen[0] = true;
                assert_eq!(field(row, 5), 0.3);
                assert_eq!(field(row, 6), -0.1);
                assert_eq!(field(row, 7), 0.0);
            }
            AttackLabel::DoS => {
                seen[1] = true;
                assert_eq!(field(row, 5), 0.3);
                assert_eq!(field(row, 6), -0.1);
                assert_eq!(field(row, 7), 0.0);
            }
        }

        // Sensor cells and the scripted velocity flow into every row.
        assert_eq!(field(row, 1), 48.25);
        assert_eq!(field(row, 2), 11.625);
        assert_eq!(field(row, 3), 5.0);
        assert!((field(row, 4) - 1.0).abs() < 1e-12);
    }
    assert!(seen.iter().all(|label| *label));
    fs::remove_file(&csv_path).expect("failed to remove temp file");
}

#[test]
fn test_label_and_metric_sequence_is_reproducible() {
    let (first, _c1, first_path) = build_capture("repro_a", 42, 200, None);
    run_capture(first).expect("capture failed");
    let (second, _c2, second_path) = build_capture("repro_b", 42, 200, None);
    run_capture(second).expect("capture failed");

    let first_rows = read_rows(&first_path);
    let second_rows = read_rows(&second_path);
    assert_eq!(first_rows.len(), second_rows.len());
    for (a, b) in first_rows.iter().zip(second_rows.iter()).skip(1) {
        // Everything but the wall-clock timestamp must match run to run.
        let a_fields: Vec<&str> = a.split(',').skip(1).collect();
        let b_fields: Vec<&str> = b.split(',').skip(1).collect();
        assert_eq!(a_fields, b_fields);
    }
    fs::remove_file(&first_path).expect("failed to remove temp file");
    fs::remove_file(&second_path).expect("failed to remove temp file");
}

#[test]
fn test_mid_loop_fault_still_tears_down() {
    let (capture, counters, csv_path) = build_capture("fault", 42, 100, Some(51));
    let outcome = run_capture(capture);
    assert!(outcome.is_err());

    // All three actors are destroyed and the file is closed with the rows
    // emitted before the fault.
    assert_eq!(WorldCounters::count(&counters.vehicle_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.gnss_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.imu_destroys), 1);
    assert_eq!(WorldCounters::count(&counters.shutdowns), 1);

    let lines = read_rows(&csv_path);
    assert_eq!(lines.len(), 51);
    fs::remove_file(&csv_path).expect("failed to remove temp file");
}
