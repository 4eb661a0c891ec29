use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformPathError {
    #[error("home directory unavailable")]
    HomeDirUnavailable,

    #[error("data local directory unavailable")]
    DataLocalDirUnavailable,

    #[error("cache directory unavailable")]
    CacheDirUnavailable,
}
