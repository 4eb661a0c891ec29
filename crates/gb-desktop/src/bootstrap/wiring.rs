//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra and platform implementations behind their ports / 创建端口背后的 infra 与 platform 实现
//! - ✅ Construct the nine application services in dependency order / 按依赖顺序构造九个应用服务
//! - ✅ Hand the UI one [`AppServices`] aggregate / 向 UI 交付一个 [`AppServices`] 聚合
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic and no I/O / 禁止业务逻辑与 I/O**
//! - Constructors only store handles
//! - 构造函数只保存句柄
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Only what a constructor itself rejects fails wiring
//! - 只有构造函数自身拒绝的输入才会导致装配失败
//!
//! This is the only place allowed to depend on gb-infra, gb-platform and
//! gb-app at the same time, and only for assembly.
//! 这是唯一允许同时依赖 gb-infra、gb-platform 和 gb-app 的地方，且仅用于装配。

use std::path::PathBuf;
use std::sync::Arc;

use gb_app::services::{
    AiService, AuthService, CloudClient, GitConfig, GitHubService, ProjectService,
    SummarizerSettings, UpdaterService, UserService,
};
use gb_app::AppServices;
use gb_core::config::AppConfig;
use gb_core::ports::{
    AppSettingsPort, FetchPort, GitConfigPort, PlatformPathsPort, SubsystemActivatorPort,
};
use gb_core::ReactiveCell;
use gb_infra::{FileAppSettings, PostHogTelemetry, ProcessGitConfig};
use gb_platform::DirsPlatformPaths;
use tracing::debug;

use super::sentry::SentryErrorReporting;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during service construction
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Project service initialization failed: {0}")]
    ProjectsInit(String),

    #[error("Cloud client initialization failed: {0}")]
    CloudInit(String),
}

/// Process-level capabilities injected into [`load`](super::load::load).
///
/// Created once at process start and shared by every bootstrap.
#[derive(Clone)]
pub struct PlatformLayer {
    pub app_settings: Arc<dyn AppSettingsPort>,
    pub paths: Arc<dyn PlatformPathsPort>,
    pub telemetry: Arc<dyn SubsystemActivatorPort>,
    pub error_reporting: Arc<dyn SubsystemActivatorPort>,
    pub git_config: Arc<dyn GitConfigPort>,
}

/// Build the production platform layer from configuration.
pub fn create_platform_layer(config: &AppConfig) -> PlatformLayer {
    PlatformLayer {
        app_settings: Arc::new(FileAppSettings::new(config.settings_path.clone())),
        paths: Arc::new(DirsPlatformPaths::new()),
        telemetry: Arc::new(PostHogTelemetry::new(
            config.posthog_api_key.clone(),
            config.posthog_host.clone(),
        )),
        error_reporting: Arc::new(SentryErrorReporting::new(config.sentry_dsn.clone())),
        git_config: Arc::new(ProcessGitConfig::global()),
    }
}

/// Everything service construction depends on, resolved by the caller.
pub struct ServiceInputs {
    pub home_dir: PathBuf,
    pub fetch: Arc<dyn FetchPort>,
    pub cloud_api_url: String,
    pub git_config: Arc<dyn GitConfigPort>,
}

/// Construct the service graph.
///
/// Order matters: each service only receives handles built before it. On
/// error nothing is returned, there is no partially wired aggregate.
pub fn wire_services(inputs: ServiceInputs) -> WiringResult<AppServices> {
    let ServiceInputs {
        home_dir,
        fetch,
        cloud_api_url,
        git_config,
    } = inputs;

    let auth = Arc::new(AuthService::new());
    debug!("Wired auth service");

    let projects = Arc::new(
        ProjectService::new(home_dir).map_err(|e| WiringError::ProjectsInit(e.to_string()))?,
    );
    debug!(default_path = %projects.default_path().display(), "Wired project service");

    let updater = Arc::new(UpdaterService::new());
    debug!(version = updater.current_version(), "Wired updater service");

    let users = Arc::new(UserService::new());
    debug!("Wired user service");

    // Written by branch tracking once a project is open, read by GitHub.
    let remote_url = Arc::new(ReactiveCell::<String>::new());
    let github = Arc::new(GitHubService::new(
        users.access_token(),
        remote_url.reader(),
    ));
    debug!("Wired GitHub service");

    let cloud = Arc::new(
        CloudClient::new(fetch, cloud_api_url).map_err(|e| WiringError::CloudInit(e.to_string()))?,
    );
    debug!(base_url = cloud.base_url(), "Wired cloud client");

    let git_config = Arc::new(GitConfig::new(git_config));
    let summarizer_settings = Arc::new(SummarizerSettings::new(git_config.clone()));
    let ai = Arc::new(AiService::new(
        summarizer_settings.clone(),
        cloud.clone(),
        users.user(),
    ));
    debug!("Wired git config, summarizer settings and AI service");

    Ok(AppServices {
        auth,
        cloud,
        github,
        projects,
        updater,
        user: users.user(),
        users,
        remote_url,
        git_config,
        summarizer_settings,
        ai,
    })
}
