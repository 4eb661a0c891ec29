use async_trait::async_trait;

/// Access to the user's git configuration.
#[async_trait]
pub trait GitConfigPort: Send + Sync {
    /// Value for `key`, `None` when the key is not set.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
