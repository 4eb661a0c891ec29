use async_trait::async_trait;
use std::path::PathBuf;

use crate::ports::errors::PlatformPathError;

/// Platform directory lookup, resolved once per bootstrap.
#[async_trait]
pub trait PlatformPathsPort: Send + Sync {
    /// The current user's home directory.
    async fn home_dir(&self) -> Result<PathBuf, PlatformPathError>;
}
