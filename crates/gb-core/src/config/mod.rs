//! # Pure data module: application configuration
//!
//! ## Responsibilities
//!
//! - Define the configuration data structure
//! - Map TOML into the DTO
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No business rules
//!
//! Missing values are empty. An empty value is a fact about the file, not an
//! error; whoever consumes the field decides what it means.

use std::path::{Path, PathBuf};

const DEFAULT_CLOUD_API_URL: &str = "https://app.gitbutler.com/";
const DEFAULT_POSTHOG_HOST: &str = "https://eu.posthog.com";

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the cloud API used by the transport client
    pub cloud_api_url: String,

    /// Persisted app settings (telemetry / error reporting flags)
    pub settings_path: PathBuf,

    /// Directory swept by the process cache at startup
    pub cache_dir: PathBuf,

    /// Directory for the rolling log file
    pub logs_dir: PathBuf,

    /// Sentry DSN, empty means crash reporting cannot start
    pub sentry_dsn: String,

    /// PostHog project key, empty means telemetry cannot start
    pub posthog_api_key: String,

    /// PostHog ingestion host
    pub posthog_host: String,
}

impl AppConfig {
    /// Create AppConfig from a TOML value.
    ///
    /// Must not validate or invent defaults: absent keys become empty values.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            cloud_api_url: str_at("cloud", "api_url"),
            settings_path: PathBuf::from(str_at("storage", "settings_path")),
            cache_dir: PathBuf::from(str_at("storage", "cache_dir")),
            logs_dir: PathBuf::from(str_at("storage", "logs_dir")),
            sentry_dsn: str_at("error_reporting", "sentry_dsn"),
            posthog_api_key: str_at("telemetry", "posthog_api_key"),
            posthog_host: str_at("telemetry", "posthog_host"),
        })
    }

    /// Create an AppConfig with every field empty.
    pub fn empty() -> Self {
        Self {
            cloud_api_url: String::new(),
            settings_path: PathBuf::new(),
            cache_dir: PathBuf::new(),
            logs_dir: PathBuf::new(),
            sentry_dsn: String::new(),
            posthog_api_key: String::new(),
            posthog_host: String::new(),
        }
    }

    /// First-start configuration built from platform directories.
    ///
    /// The directories are computed by the caller (see `gb-platform`).
    /// Keys for Sentry and PostHog stay empty until a config file sets them.
    pub fn with_defaults(data_root: &Path, cache_root: &Path) -> Self {
        Self {
            cloud_api_url: DEFAULT_CLOUD_API_URL.to_string(),
            settings_path: data_root.join("settings.json"),
            cache_dir: cache_root.join("cache"),
            logs_dir: data_root.join("logs"),
            sentry_dsn: String::new(),
            posthog_api_key: String::new(),
            posthog_host: DEFAULT_POSTHOG_HOST.to_string(),
        }
    }
}
