//! # gb-core
//!
//! Core ports and plain data for the GitButler desktop client.
//!
//! Nothing here performs I/O. Adapters live in `gb-infra` and `gb-platform`,
//! composition lives in `gb-desktop`.

pub mod app_dirs;
pub mod cell;
pub mod config;
pub mod http;
pub mod ports;
pub mod user;

// Re-export commonly used types at the crate root
pub use app_dirs::AppDirs;
pub use cell::{CellReader, CellSubscription, CellValue, ReactiveCell};
pub use config::AppConfig;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use user::User;
