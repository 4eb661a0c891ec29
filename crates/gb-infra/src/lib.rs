pub mod analytics;
pub mod cache;
pub mod git_config;
pub mod http;
pub mod settings;

pub use analytics::PostHogTelemetry;
pub use cache::{init_process_cache, ProcessCache};
pub use git_config::ProcessGitConfig;
pub use http::ReqwestFetch;
pub use settings::FileAppSettings;
