//! Long-lived service handles
//!
//! Each service is constructed once per bootstrap by the wiring in
//! `gb-desktop` and then shared read-only with the UI. Constructors never do
//! I/O; network, git and disk access only happen when a method is called.

pub mod ai;
pub mod auth;
pub mod cloud;
pub mod git_config;
pub mod github;
pub mod projects;
pub mod summarizer_settings;
pub mod updater;
pub mod user;

pub use ai::{AiBackend, AiError, AiService};
pub use auth::{AuthService, LoginToken};
pub use cloud::{CloudClient, CloudError};
pub use git_config::GitConfig;
pub use github::{GitHubRepo, GitHubService};
pub use projects::{ProjectError, ProjectService};
pub use summarizer_settings::{KeyOption, ModelKind, SummarizerSettings};
pub use updater::{UpdateStatus, UpdaterService};
pub use user::UserService;
