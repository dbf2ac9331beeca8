use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};

use avgen_core::client::GnssFix;
use avgen_core::tick::TimeMS;

use crate::result::{ResultWriter, WriterType};

/// Diagnostic trace of the vehicle position per tick.
#[derive(Debug)]
pub struct VehiclePosWriter {
    time_step: Vec<u64>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    speed: Vec<f64>,
    to_output: WriterType,
}

impl VehiclePosWriter {
    pub fn new(output_file: PathBuf) -> Self {
        Self {
            to_output: WriterType::new(&output_file, Self::schema()),
            time_step: Vec::new(),
            latitude: Vec::new(),
            longitude: Vec::new(),
            speed: Vec::new(),
        }
    }

    pub fn add_data(&mut self, time_step: TimeMS, fix: GnssFix, speed: f64) {
        self.time_step.push(time_step.as_u64());
        self.latitude.push(fix.latitude);
        self.longitude.push(fix.longitude);
        self.speed.push(speed);
    }
}

impl ResultWriter for VehiclePosWriter {
    fn schema() -> Schema {
        let time_step = Field::new("time_step", DataType::UInt64, false);
        let latitude = Field::new("latitude", DataType::Float64, false);
        let longitude = Field::new("longitude", DataType::Float64, false);
        let speed = Field::new("speed", DataType::Float64, false);
        Schema::new(vec![time_step, latitude, longitude, speed])
    }

    fn write_to_file(&mut self) {
        let record_batch = RecordBatch::try_from_iter(vec![
            (
                "time_step",
                Arc::new(UInt64Array::from(std::mem::take(&mut self.time_step))) as ArrayRef,
            ),
            (
                "latitude",
                Arc::new(Float64Array::from(std::mem::take(&mut self.latitude))) as ArrayRef,
            ),
            (
                "longitude",
                Arc::new(Float64Array::from(std::mem::take(&mut self.longitude))) as ArrayRef,
            ),
            (
                "speed",
                Arc::new(Float64Array::from(std::mem::take(&mut self.speed))) as ArrayRef,
            ),
        ])
        .expect("Failed to convert results to record batch");
        self.to_output.record_batch_to_file(&record_batch);
    }

    fn close_file(self) {
        self.to_output.close()
    }
}
