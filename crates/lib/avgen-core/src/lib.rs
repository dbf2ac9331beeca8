#![forbid(unsafe_code)]

pub use hashbrown;

pub mod actor;
pub mod cell;
pub mod client;
pub mod metrics;
pub mod tick;
