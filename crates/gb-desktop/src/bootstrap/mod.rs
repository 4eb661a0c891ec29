pub mod config;
pub mod load;
pub mod run;
pub mod sentry;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use load::{load, BootstrapError, LoadedApp};
pub use run::run_app;
pub use wiring::{create_platform_layer, wire_services, PlatformLayer, ServiceInputs, WiringError};
