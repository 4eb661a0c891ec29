//! Startup use cases run by the bootstrap.

pub mod config_gate;

pub use config_gate::{ConfigFlag, ConfigGate, ConfigGateTasks};
