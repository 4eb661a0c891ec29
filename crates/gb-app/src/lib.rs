//! GitButler application layer
//!
//! Service handles the UI consumes, the aggregate that carries them, and the
//! startup use cases (Config Gate) run by the bootstrap.

pub mod app_services;
pub mod services;
pub mod task;
pub mod usecases;

pub use app_services::AppServices;
pub use task::{spawn_detached, DetachedTask};
