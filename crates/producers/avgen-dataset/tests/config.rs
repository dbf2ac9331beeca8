use std::path::Path;

use avgen_core::tick::TimeMS;
use avgen_dataset::simulation::config::BaseConfigReader;
use avgen_output::result::OutputType;

#[test]
fn test_shipped_config_parses() {
    let config_file = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join("dataset.toml");
    let reader = BaseConfigReader::new(config_file.to_str().expect("bad path"));
    let config = reader.parse().expect("failed to parse shipped config");

    assert_eq!(config.capture_settings.scenario, "av_ddos");
    assert_eq!(config.capture_settings.sample_count, 5000);
    assert_eq!(config.capture_settings.tick_interval, TimeMS::from(100u64));
    assert_eq!(config.capture_settings.seed, 42);
    assert_eq!(config.world_settings.step_interval, TimeMS::from(20u64));
    assert_eq!(config.log_settings.log_level, "info");
    assert_eq!(config.output_settings.outputs.len(), 2);
    assert_eq!(
        config.output_settings.outputs[0].output_type,
        OutputType::Dataset
    );
}

#[test]
fn test_missing_config_is_an_error() {
    let reader = BaseConfigReader::new("does/not/exist.toml");
    assert!(reader.parse().is_err());
}

#[test]
fn test_incomplete_config_is_an_error() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("avgen_bad_config_{}.toml", std::process::id()));
    std::fs::write(&path, "[capture_settings]\nscenario = \"partial\"\n")
        .expect("failed to write temp config");
    let reader = BaseConfigReader::new(path.to_str().expect("bad path"));
    assert!(reader.parse().is_err());
    std::fs::remove_file(&path).expect("failed to remove temp config");
}
