use anyhow::{Context, Result};
use async_trait::async_trait;
use gb_core::ports::AppSettingsPort;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::fs;

/// On-disk shape of the flags the desktop client persists in
/// `settings.json`. Unknown keys belong to the UI and are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedFlags {
    #[serde(default = "enabled")]
    app_metrics_enabled: bool,
    #[serde(default = "enabled")]
    app_error_reporting_enabled: bool,
}

fn enabled() -> bool {
    true
}

impl Default for PersistedFlags {
    fn default() -> Self {
        Self {
            app_metrics_enabled: true,
            app_error_reporting_enabled: true,
        }
    }
}

pub struct FileAppSettings {
    path: PathBuf,
}

impl FileAppSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the flags fresh from disk.
    ///
    /// A missing file means nothing was ever opted out of, so every flag is on.
    async fn load(&self) -> Result<PersistedFlags> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedFlags::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))
    }
}

#[async_trait]
impl AppSettingsPort for FileAppSettings {
    async fn is_telemetry_enabled(&self) -> Result<bool> {
        Ok(self.load().await?.app_metrics_enabled)
    }

    async fn is_error_reporting_enabled(&self) -> Result<bool> {
        Ok(self.load().await?.app_error_reporting_enabled)
    }
}
