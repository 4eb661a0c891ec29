//! Process-wide key/value cache with per-entry expiry.
//!
//! Entries live as small JSON files under one directory so they survive
//! restarts. Nothing sweeps the directory on its own: call
//! [`init_process_cache`] once at startup, which drops whatever expired while
//! the app was closed, along with temp files of interrupted writes.
//!
//! Bootstrap only installs and sweeps the cache. Services that want to memoize
//! slow lookups reach it through [`process_cache`] and use
//! [`ProcessCache::set`], [`ProcessCache::get`] and [`ProcessCache::remove`].

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

const ENTRY_EXTENSION: &str = "json";
const TMP_EXTENSION: &str = "tmp";

/// Temp files younger than this may belong to a write still in flight.
const TMP_GRACE: std::time::Duration = std::time::Duration::from_secs(60);

static PROCESS_CACHE: OnceCell<Arc<ProcessCache>> = OnceCell::const_new();

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: String,
    value: serde_json::Value,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug)]
pub struct ProcessCache {
    dir: PathBuf,
}

impl ProcessCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", hex::encode(key.as_bytes())))
    }

    /// Store `value` under `key`. `ttl` of `None` never expires.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create cache dir failed: {}", self.dir.display()))?;

        let entry = CacheEntry {
            key: key.to_string(),
            value: serde_json::to_value(value).context("serialize cache value failed")?,
            expires_at: ttl.map(|ttl| Utc::now() + ttl),
        };

        let path = self.entry_path(key);
        let tmp_path = self.dir.join(format!("{}.{TMP_EXTENSION}", uuid::Uuid::new_v4()));
        fs::write(&tmp_path, serde_json::to_vec(&entry)?)
            .await
            .with_context(|| format!("write cache entry failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("rename cache entry failed: {}", path.display()))?;
        Ok(())
    }

    /// Value stored under `key`, `None` when missing or expired.
    ///
    /// Expired entries are removed on read.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.entry_path(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read cache entry failed: {}", path.display()))
            }
        };

        let entry: CacheEntry = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse cache entry failed: {}", path.display()))?;
        if entry.is_expired(Utc::now()) {
            if let Err(e) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove expired cache entry");
            }
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(entry.value)?))
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every expired or unreadable entry, plus temp files left behind by
    /// writes that never reached the rename. Returns how many files were removed.
    pub async fn flush_expired(&self) -> Result<usize> {
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read cache dir failed: {}", self.dir.display()))
            }
        };

        let now = Utc::now();
        let mut removed = 0;
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            let stale = match path.extension().and_then(|e| e.to_str()) {
                Some(ENTRY_EXTENSION) => match fs::read(&path).await {
                    Ok(bytes) => serde_json::from_slice::<CacheEntry>(&bytes)
                        .map(|entry| entry.is_expired(now))
                        .unwrap_or(true),
                    Err(_) => true,
                },
                Some(TMP_EXTENSION) => is_abandoned_tmp(&item).await,
                _ => continue,
            };
            if !stale {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stale cache entry"),
            }
        }

        debug!(removed, dir = %self.dir.display(), "Flushed expired cache entries");
        Ok(removed)
    }
}

async fn is_abandoned_tmp(item: &fs::DirEntry) -> bool {
    let modified = match item.metadata().await.and_then(|meta| meta.modified()) {
        Ok(modified) => modified,
        Err(_) => return true,
    };
    // A timestamp in the future reads as fresh.
    modified
        .elapsed()
        .map(|age| age >= TMP_GRACE)
        .unwrap_or(false)
}

/// Install the process cache rooted at `dir`, sweeping expired entries first.
///
/// Only the first call does any work. Later calls return the same instance,
/// whatever `dir` they pass.
pub async fn init_process_cache(dir: impl Into<PathBuf>) -> Result<Arc<ProcessCache>> {
    let dir = dir.into();
    let cache = PROCESS_CACHE
        .get_or_try_init(|| async {
            let cache = ProcessCache::new(&dir);
            let removed = cache.flush_expired().await?;
            info!(dir = %dir.display(), removed, "Process cache initialized");
            Ok::<_, anyhow::Error>(Arc::new(cache))
        })
        .await?;

    if cache.dir() != dir.as_path() {
        debug!(
            requested = %dir.display(),
            active = %cache.dir().display(),
            "Process cache already initialized, ignoring new directory"
        );
    }
    Ok(cache.clone())
}

/// The installed process cache, if [`init_process_cache`] has run.
pub fn process_cache() -> Option<Arc<ProcessCache>> {
    PROCESS_CACHE.get().cloned()
}
