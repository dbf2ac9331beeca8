use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::csv::Writer;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchWriter};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Deserialize;

use avgen_core::tick::TimeMS;

use crate::tables::dataset::DatasetWriter;
use crate::tables::position::VehiclePosWriter;

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputType {
    Dataset,
    VehiclePos,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OutputSettings {
    pub output_interval: TimeMS,
    pub output_path: String,
    pub outputs: Vec<Outputs>,
    pub scenario_id: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Outputs {
    pub output_type: OutputType,
    pub output_filename: String,
}

pub trait ResultWriter {
    fn schema() -> Schema;
    fn write_to_file(&mut self);
    fn close_file(self);
}

#[derive(Debug)]
pub enum WriterType {
    Parquet(WriterParquet),
    Csv(WriterCsv),
}

impl WriterType {
    pub fn new(file_name: &PathBuf, schema: Schema) -> Self {
        if file_name.exists() {
            match std::fs::remove_file(file_name) {
                Ok(_) => {}
                Err(e) => panic!("Error deleting file: {}", e),
            }
        }
        match file_name.extension() {
            Some(ext) => match ext.to_str() {
                Some("parquet") => WriterType::Parquet(WriterParquet::new(file_name, schema)),
                Some("csv") => WriterType::Csv(WriterCsv::new(file_name)),
                _ => panic!("Invalid file extension"),
            },
            None => panic!("Invalid file extension"),
        }
    }

    pub fn record_batch_to_file(&mut self, record_batch: &RecordBatch) {
        match self {
            WriterType::Parquet(to_output) => to_output
                .writer
                .write(record_batch)
                .expect("Failed to write parquet"),
            WriterType::Csv(to_output) => to_output
                .writer
                .write(record_batch)
                .expect("Failed to write csv"),
        }
    }

    pub fn close(self) {
        match self {
            WriterType::Parquet(to_output) => to_output.close(),
            WriterType::Csv(to_output) => to_output.close(),
        }
    }
}

#[derive(Debug)]
pub struct WriterParquet {
    pub writer: ArrowWriter<File>,
}

impl WriterParquet {
    fn new(file_name: &PathBuf, schema: Schema) -> Self {
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let output_file = match File::create(file_name) {
            Ok(file) => file,
            Err(_) => panic!("Failed to create output file to write"),
        };
        let writer = match ArrowWriter::try_new(output_file, SchemaRef::from(schema), Some(props)) {
            Ok(writer) => writer,
            Err(_) => panic!("Failed to create output file writer"),
        };
        Self { writer }
    }

    pub fn close(self) {
        self.writer.close().expect("Failed to close parquet file");
    }
}

#[derive(Debug)]
pub struct WriterCsv {
    pub writer: Writer<File>,
}

impl WriterCsv {
    fn new(file_name: &PathBuf) -> Self {
        let writer = Writer::new(File::create(file_name).expect("failed to create file"));
        Self { writer }
    }

    pub fn close(self) {
        self.writer.close().expect("failed to close csv file");
    }
}

/// The configured output tables. The dataset table is the pipeline's
/// deliverable; the position trace is a diagnostic companion.
#[derive(Debug)]
pub struct Results {
    pub dataset: Option<DatasetWriter>,
    pub positions: Option<VehiclePosWriter>,
}

impl Results {
    pub fn new(output_settings: &OutputSettings) -> Self {
        let output_path = Path::new(&output_settings.output_path)
            .join(output_settings.scenario_id.to_string())
            .join("files");
        if !output_path.exists() {
            fs::create_dir_all(&output_path).expect("Failed to create output directory");
        }

        let dataset = output_settings
            .outputs
            .iter()
            .filter(|output| output.output_type == OutputType::Dataset)
            .last()
            .map(|settings| DatasetWriter::new(output_path.join(&settings.output_filename)));
        let positions = output_settings
            .outputs
            .iter()
            .filter(|output| output.output_type == OutputType::VehiclePos)
            .last()
            .map(|settings| VehiclePosWriter::new(output_path.join(&settings.output_filename)));
        Self { dataset, positions }
    }

    pub fn write_to_file(&mut self) {
        if let Some(writer) = &mut self.dataset {
            writer.write_to_file();
        }
        if let Some(writer) = &mut self.positions {
            writer.write_to_file();
        }
    }

    pub fn close_files(self) {
        if let Some(writer) = self.dataset {
            writer.close_file();
        }
        if let Some(writer) = self.positions {
            writer.close_file();
        }
    }
}
