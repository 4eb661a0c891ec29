use async_trait::async_trait;

/// Read access to the persisted application settings.
///
/// Values are read from disk on every call; caching is the adapter's concern.
#[async_trait]
pub trait AppSettingsPort: Send + Sync {
    async fn is_telemetry_enabled(&self) -> anyhow::Result<bool>;
    async fn is_error_reporting_enabled(&self) -> anyhow::Result<bool>;
}

#[cfg(test)]
mockall::mock! {
    pub AppSettings {}

    #[async_trait]
    impl AppSettingsPort for AppSettings {
        async fn is_telemetry_enabled(&self) -> anyhow::Result<bool>;
        async fn is_error_reporting_enabled(&self) -> anyhow::Result<bool>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn port_is_object_safe() {
        let mut mock = MockAppSettings::new();
        mock.expect_is_telemetry_enabled().returning(|| Ok(true));
        mock.expect_is_error_reporting_enabled()
            .returning(|| Err(anyhow::anyhow!("settings unreadable")));

        let port: Arc<dyn AppSettingsPort> = Arc::new(mock);

        assert!(port.is_telemetry_enabled().await.unwrap());
        assert!(port.is_error_reporting_enabled().await.is_err());
    }
}
