//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read the TOML configuration file / 读取 TOML 配置文件
//! - ✅ Parse TOML into the `AppConfig` DTO / 将 TOML 解析为 `AppConfig` DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value logic / 禁止默认值逻辑** (see `run::resolve_config` / 见 `run::resolve_config`)

use anyhow::Context;
use gb_core::config::AppConfig;
use std::path::PathBuf;

/// Load configuration from a TOML file.
///
/// Pure data loading: empty strings and missing sections are accepted as
/// they are.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [cloud]
            api_url = "https://cloud.test/"

            [storage]
            settings_path = "/data/settings.json"
            cache_dir = "/cache"
            logs_dir = "/data/logs"

            [error_reporting]
            sentry_dsn = "https://key@sentry.test/1"

            [telemetry]
            posthog_api_key = "phc_key"
            posthog_host = "https://ph.test"
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.cloud_api_url, "https://cloud.test/");
        assert_eq!(config.settings_path, PathBuf::from("/data/settings.json"));
        assert_eq!(config.cache_dir, PathBuf::from("/cache"));
        assert_eq!(config.logs_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.sentry_dsn, "https://key@sentry.test/1");
        assert_eq!(config.posthog_api_key, "phc_key");
        assert_eq!(config.posthog_host, "https://ph.test");
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let temp_file = write_config(
            r#"
            [cloud]
            # api_url is missing

            [telemetry]
            # keys are missing
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        // Empty values are facts, not errors
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_config("[cloud\napi_url = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let non_existent_path = PathBuf::from("/this/path/does/not/exist/config.toml");

        let err = load_config(non_existent_path).unwrap_err();
        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }
}
