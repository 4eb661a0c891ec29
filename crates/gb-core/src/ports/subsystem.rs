use async_trait::async_trait;

/// Starts an optional process-wide subsystem such as telemetry or crash
/// reporting.
///
/// Activation may be attempted more than once; implementations must make the
/// second call a no-op.
#[async_trait]
pub trait SubsystemActivatorPort: Send + Sync {
    fn name(&self) -> &'static str;

    async fn activate(&self) -> anyhow::Result<()>;
}
