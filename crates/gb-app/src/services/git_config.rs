use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use gb_core::ports::GitConfigPort;

/// Accessor for the user's git configuration.
#[derive(Clone)]
pub struct GitConfig {
    port: Arc<dyn GitConfigPort>,
}

impl fmt::Debug for GitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitConfig").finish_non_exhaustive()
    }
}

impl GitConfig {
    pub fn new(port: Arc<dyn GitConfigPort>) -> Self {
        Self { port }
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.port
            .get(key)
            .await
            .with_context(|| format!("failed to read git config {key}"))
    }

    /// Read a git boolean (`true/yes/on/1`, `false/no/off/0`).
    ///
    /// Anything else reads as `None`, the same as an unset key.
    pub async fn get_bool(&self, key: &str) -> anyhow::Result<Option<bool>> {
        Ok(self.get(key).await?.as_deref().and_then(parse_git_bool))
    }

    pub async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.port
            .set(key, value)
            .await
            .with_context(|| format!("failed to write git config {key}"))
    }
}

fn parse_git_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}
