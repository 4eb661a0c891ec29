//! Port interfaces consumed by the composition layer
//!
//! Ports define the contract between services / bootstrap and the concrete
//! adapters in `gb-infra` and `gb-platform`. Composition code only ever sees
//! `Arc<dyn Port>`, so tests can swap any capability for a fake.

pub mod app_settings;
pub mod errors;
pub mod fetch;
pub mod git_config;
pub mod platform_paths;
pub mod subsystem;

pub use app_settings::AppSettingsPort;
pub use errors::PlatformPathError;
pub use fetch::FetchPort;
pub use git_config::GitConfigPort;
pub use platform_paths::PlatformPathsPort;
pub use subsystem::SubsystemActivatorPort;
