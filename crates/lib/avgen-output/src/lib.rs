pub mod logger;
pub mod result;
pub mod tables;
