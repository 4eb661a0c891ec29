use std::path::PathBuf;

use async_trait::async_trait;
use gb_core::{
    app_dirs::AppDirs,
    ports::{PlatformPathError, PlatformPathsPort},
};
use tracing::debug;

const APP_DIR_NAME: &str = "gitbutler";

/// Directory lookup through the `dirs` crate.
pub struct DirsPlatformPaths {
    base_dir_override: Option<PathBuf>,
}

impl DirsPlatformPaths {
    pub fn new() -> Self {
        Self {
            base_dir_override: None,
        }
    }

    /// Creates a test-only adapter that resolves every directory under `base`.
    ///
    /// The home directory becomes `base` itself; data and cache roots become
    /// `base/gitbutler`.
    #[cfg(test)]
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            base_dir_override: Some(base),
        }
    }

    fn base_or(&self, lookup: fn() -> Option<PathBuf>) -> Option<PathBuf> {
        match &self.base_dir_override {
            Some(base) => Some(base.clone()),
            None => lookup(),
        }
    }

    /// Application data and cache roots for this user.
    pub fn app_dirs(&self) -> Result<AppDirs, PlatformPathError> {
        let base_data = self
            .base_or(dirs::data_local_dir)
            .ok_or(PlatformPathError::DataLocalDirUnavailable)?;
        let base_cache = self
            .base_or(dirs::cache_dir)
            .ok_or(PlatformPathError::CacheDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(APP_DIR_NAME),
            app_cache_root: base_cache.join(APP_DIR_NAME),
        })
    }
}

impl Default for DirsPlatformPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformPathsPort for DirsPlatformPaths {
    async fn home_dir(&self) -> Result<PathBuf, PlatformPathError> {
        if let Some(base) = &self.base_dir_override {
            return Ok(base.clone());
        }

        // `dirs::home_dir` may hit the passwd database; keep it off the runtime threads.
        let home = tokio::task::spawn_blocking(dirs::home_dir)
            .await
            .ok()
            .flatten()
            .ok_or(PlatformPathError::HomeDirUnavailable)?;
        debug!(home = %home.display(), "Resolved home directory");
        Ok(home)
    }
}
