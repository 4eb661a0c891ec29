//! # Application Services
//!
//! The aggregate handed to the UI once bootstrap finishes.
//!
//! Like a dependency grouping, this carries no logic: every field is built by
//! the wiring in `gb-desktop` and then only read. All handles are shared, so
//! cloning the aggregate is cheap and every clone sees the same services.

use std::sync::Arc;

use gb_core::{CellReader, ReactiveCell, User};

use crate::services::{
    AiService, AuthService, CloudClient, GitConfig, GitHubService, ProjectService,
    SummarizerSettings, UpdaterService, UserService,
};

#[derive(Clone)]
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub cloud: Arc<CloudClient>,
    pub github: Arc<GitHubService>,
    pub projects: Arc<ProjectService>,
    pub updater: Arc<UpdaterService>,
    pub users: Arc<UserService>,

    /// Writer for the current repository's remote URL. The UI publishes here
    /// when the active project changes; `github` reads it.
    pub remote_url: Arc<ReactiveCell<String>>,
    /// Current user, same cell `users` writes.
    pub user: CellReader<User>,

    pub git_config: Arc<GitConfig>,
    pub summarizer_settings: Arc<SummarizerSettings>,
    pub ai: Arc<AiService>,
}
