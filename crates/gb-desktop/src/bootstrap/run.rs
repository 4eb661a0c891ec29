use std::sync::Arc;

use anyhow::Context;
use gb_core::{config::AppConfig, AppDirs};
use gb_infra::{init_process_cache, ReqwestFetch};
use gb_platform::DirsPlatformPaths;
use tracing::{info, warn};

use super::config::load_config;
use super::load::load;
use super::tracing::init_tracing_subscriber;
use super::wiring::create_platform_layer;

/// Run the desktop client until Ctrl-C.
pub async fn run_app() -> anyhow::Result<()> {
    let app_dirs = DirsPlatformPaths::new()
        .app_dirs()
        .context("Failed to resolve application directories")?;
    let config = resolve_config(&app_dirs);

    init_tracing_subscriber(&config.logs_dir)?;
    info!(config = %app_dirs.config_file().display(), "Starting GitButler");

    if let Err(err) = init_process_cache(&config.cache_dir).await {
        warn!(error = %format!("{err:#}"), "Process cache unavailable");
    }

    let platform = create_platform_layer(&config);
    let fetch = Arc::new(ReqwestFetch::new()?);
    let loaded = load(&platform, fetch, &config).await?;

    info!(
        default_path = %loaded.services.projects.default_path().display(),
        cloud = loaded.services.cloud.base_url(),
        version = loaded.services.updater.current_version(),
        "Services ready"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    Ok(())
}

/// Config file values, with anything left empty taken from the first-start
/// defaults.
///
/// Runs before tracing exists, so problems go to stderr.
fn resolve_config(app_dirs: &AppDirs) -> AppConfig {
    let defaults = AppConfig::with_defaults(&app_dirs.app_data_root, &app_dirs.app_cache_root);
    let path = app_dirs.config_file();
    if !path.exists() {
        return defaults;
    }

    match load_config(path) {
        Ok(loaded) => fill_empty(loaded, defaults),
        Err(err) => {
            eprintln!("Failed to load config, using defaults: {err:#}");
            defaults
        }
    }
}

fn fill_empty(config: AppConfig, defaults: AppConfig) -> AppConfig {
    fn or_str(value: String, default: String) -> String {
        if value.is_empty() {
            default
        } else {
            value
        }
    }
    fn or_path(value: std::path::PathBuf, default: std::path::PathBuf) -> std::path::PathBuf {
        if value.as_os_str().is_empty() {
            default
        } else {
            value
        }
    }

    AppConfig {
        cloud_api_url: or_str(config.cloud_api_url, defaults.cloud_api_url),
        settings_path: or_path(config.settings_path, defaults.settings_path),
        cache_dir: or_path(config.cache_dir, defaults.cache_dir),
        logs_dir: or_path(config.logs_dir, defaults.logs_dir),
        sentry_dsn: or_str(config.sentry_dsn, defaults.sentry_dsn),
        posthog_api_key: or_str(config.posthog_api_key, defaults.posthog_api_key),
        posthog_host: or_str(config.posthog_host, defaults.posthog_host),
    }
}
