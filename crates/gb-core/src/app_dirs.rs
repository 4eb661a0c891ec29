use std::path::PathBuf;

/// Per-user application directories resolved by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
    pub app_cache_root: PathBuf,
}

impl AppDirs {
    pub fn config_file(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }
}
