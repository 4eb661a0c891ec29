//! `GitConfigPort` that shells out to the `git` binary.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use gb_core::ports::GitConfigPort;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Which config file `git config` reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitConfigScope {
    Global,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ProcessGitConfig {
    git: PathBuf,
    scope: GitConfigScope,
}

impl ProcessGitConfig {
    /// Reads and writes the user's global git config.
    pub fn global() -> Self {
        Self::new("git", GitConfigScope::Global)
    }

    pub fn new(git: impl Into<PathBuf>, scope: GitConfigScope) -> Self {
        Self {
            git: git.into(),
            scope,
        }
    }

    fn args(&self, rest: &[&str]) -> Vec<String> {
        let mut args = vec!["config".to_string()];
        match &self.scope {
            GitConfigScope::Global => args.push("--global".to_string()),
            GitConfigScope::File(path) => {
                args.push("--file".to_string());
                args.push(path.display().to_string());
            }
        }
        args.extend(rest.iter().map(|s| s.to_string()));
        args
    }
}

#[async_trait]
impl GitConfigPort for ProcessGitConfig {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let output = Command::new(&self.git)
            .args(self.args(&["--get", key]))
            .output()
            .await
            .with_context(|| format!("spawn {} failed", self.git.display()))?;

        // `git config --get` exits 1 when the key is not set.
        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
                Ok(Some(value))
            }
            Some(1) => Ok(None),
            _ => bail!(
                "git config --get {key} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, "Writing git config");
        let output = Command::new(&self.git)
            .args(self.args(&[key, value]))
            .output()
            .await
            .with_context(|| format!("spawn {} failed", self.git.display()))?;

        if !output.status.success() {
            bail!(
                "git config {key} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
