use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use typed_builder::TypedBuilder;

use avgen_models::attack::AttackLabel;
use avgen_models::net::NetworkSample;

use crate::result::{ResultWriter, WriterType};

/// One assembled dataset row. Immutable once added; rows land in the output
/// table in generation order.
#[derive(Copy, Clone, Debug, TypedBuilder)]
pub struct TickRecord {
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub acceleration: f64,
    pub throttle: f64,
    pub steering: f64,
    pub brake: f64,
    pub network: NetworkSample,
    pub attack: AttackLabel,
}

/// Column-buffered writer for the labeled attack dataset. The schema field
/// names are the dataset's published header and must not change.
#[derive(Debug)]
pub struct DatasetWriter {
    timestamp: Vec<f64>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    speed: Vec<f64>,
    acceleration: Vec<f64>,
    throttle: Vec<f64>,
    steering: Vec<f64>,
    brake: Vec<f64>,
    network_latency: Vec<f64>,
    packet_loss: Vec<f64>,
    throughput: Vec<f64>,
    jitter: Vec<f64>,
    bandwidth_utilization: Vec<f64>,
    attack_type: Vec<String>,
    to_output: WriterType,
}

impl DatasetWriter {
    pub fn new(output_file: PathBuf) -> Self {
        Self {
            to_output: WriterType::new(&output_file, Self::schema()),
            timestamp: Vec::new(),
            latitude: Vec::new(),
            longitude: Vec::new(),
            speed: Vec::new(),
            acceleration: Vec::new(),
            throttle: Vec::new(),
            steering: Vec::new(),
            brake: Vec::new(),
            network_latency: Vec::new(),
            packet_loss: Vec::new(),
            throughput: Vec::new(),
            jitter: Vec::new(),
            bandwidth_utilization: Vec::new(),
            attack_type: Vec::new(),
        }
    }

    pub fn add_row(&mut self, record: TickRecord) {
        self.timestamp.push(record.timestamp);
        self.latitude.push(record.latitude);
        self.longitude.push(record.longitude);
        self.speed.push(record.speed);
        self.acceleration.push(record.acceleration);
        self.throttle.push(record.throttle);
        self.steering.push(record.steering);
        self.brake.push(record.brake);
        self.network_latency.push(record.network.latency.as_f64());
        self.packet_loss.push(record.network.packet_loss.as_f64());
        self.throughput.push(record.network.throughput.as_f64());
        self.jitter.push(record.network.jitter.as_f64());
        self.bandwidth_utilization
            .push(record.network.bandwidth_util.as_f64());
        self.attack_type.push(record.attack.to_string());
    }
}

impl ResultWriter for DatasetWriter {
    fn schema() -> Schema {
        let fields = vec![
            Field::new("Timestamp", DataType::Float64, false),
            Field::new("Latitude", DataType::Float64, false),
            Field::new("Longitude", DataType::Float64, false),
            Field::new("Speed", DataType::Float64, false),
            Field::new("Acceleration", DataType::Float64, false),
            Field::new("Throttle", DataType::Float64, false),
            Field::new("Steering", DataType::Float64, false),
            Field::new("Brake", DataType::Float64, false),
            Field::new("Network_Latency", DataType::Float64, false),
            Field::new("Packet_Loss", DataType::Float64, false),
            Field::new("Throughput", DataType::Float64, false),
            Field::new("Jitter", DataType::Float64, false),
            Field::new("Bandwidth_Utilization", DataType::Float64, false),
            Field::new("Attack_Type", DataType::Utf8, false),
        ];
        Schema::new(fields)
    }

    fn write_to_file(&mut self) {
        let record_batch = RecordBatch::try_from_iter(vec![
            (
                "Timestamp",
                Arc::new(Float64Array::from(std::mem::take(&mut self.timestamp))) as ArrayRef,
            ),
            (
                "Latitude",
                Arc::new(Float64Array::from(std::mem::take(&mut self.latitude))) as ArrayRef,
            ),
            (
                "Longitude",
                Arc::new(Float64Array::from(std::mem::take(&mut self.longitude))) as ArrayRef,
            ),
            (
                "Speed",
                Arc::new(Float64Array::from(std::mem::take(&mut self.speed))) as ArrayRef,
            ),
            (
                "Acceleration",
                Arc::new(Float64Array::from(std::mem::take(&mut self.acceleration))) as ArrayRef,
            ),
            (
                "Throttle",
                Arc::new(Float64Array::from(std::mem::take(&mut self.throttle))) as ArrayRef,
            ),
            (
                "Steering",
                Arc::new(Float64Array::from(std::mem::take(&mut self.steering))) as ArrayRef,
            ),
            (
                "Brake",
                Arc::new(Float64Array::from(std::mem::take(&mut self.brake))) as ArrayRef,
            ),
            (
                "Network_Latency",
                Arc::new(Float64Array::from(std::mem::take(&mut self.network_latency)))
                    as ArrayRef,
            ),
            (
                "Packet_Loss",
                Arc::new(Float64Array::from(std::mem::take(&mut self.packet_loss))) as ArrayRef,
            ),
            (
                "Throughput",
                Arc::new(Float64Array::from(std::mem::take(&mut self.throughput))) as ArrayRef,
            ),
            (
                "Jitter",
                Arc::new(Float64Array::from(std::mem::take(&mut self.jitter))) as ArrayRef,
            ),
            (
                "Bandwidth_Utilization",
                Arc::new(Float64Array::from(std::mem::take(
                    &mut self.bandwidth_utilization,
                ))) as ArrayRef,
            ),
            (
                "Attack_Type",
                Arc::new(StringArray::from(std::mem::take(&mut self.attack_type))) as ArrayRef,
            ),
        ])
        .expect("Failed to convert results to record batch");
        self.to_output.record_batch_to_file(&record_batch);
    }

    fn close_file(self) {
        self.to_output.close()
    }
}
