pub mod dataset;
pub mod position;
