use std::path::PathBuf;

use serde::Deserialize;

use avgen_core::tick::TimeMS;
use avgen_output::logger::LogSettings;
use avgen_output::result::OutputSettings;

use crate::world::session::WorldSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct BaseConfig {
    pub capture_settings: CaptureSettings,
    pub world_settings: WorldSettings,
    pub log_settings: LogSettings,
    pub output_settings: OutputSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CaptureSettings {
    pub scenario: String,
    pub sample_count: u32,
    pub tick_interval: TimeMS,
    pub seed: u64,
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config: BaseConfig = toml::from_str(&parsing_result)?;
        Ok(config)
    }
}
