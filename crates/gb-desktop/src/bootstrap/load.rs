//! Bootstrap entry point.
//!
//! `load` runs once per application start. It fires the Config Gate without
//! waiting on it, resolves the home directory, wires the services and hands
//! back the aggregate. Only the home directory lookup and service
//! construction can fail it.

use std::sync::Arc;

use gb_app::usecases::{ConfigGate, ConfigGateTasks};
use gb_app::AppServices;
use gb_core::config::AppConfig;
use gb_core::ports::{FetchPort, PlatformPathError};
use tracing::{info, info_span, Instrument};

use super::wiring::{wire_services, PlatformLayer, ServiceInputs, WiringError};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to resolve the home directory")]
    HomeDirUnavailable(#[source] PlatformPathError),

    #[error(transparent)]
    Wiring(#[from] WiringError),
}

/// Result of a successful bootstrap.
pub struct LoadedApp {
    pub services: AppServices,
    /// Config Gate checks still running in the background. Nothing needs to
    /// wait on them.
    pub background: ConfigGateTasks,
}

/// Bootstrap the application services.
///
/// Must be called from within a tokio runtime. Every call builds a fresh,
/// independent service graph.
pub async fn load(
    platform: &PlatformLayer,
    fetch: Arc<dyn FetchPort>,
    config: &AppConfig,
) -> Result<LoadedApp, BootstrapError> {
    let span = info_span!("bootstrap.load");

    async {
        let background = ConfigGate::new(
            platform.app_settings.clone(),
            platform.telemetry.clone(),
            platform.error_reporting.clone(),
        )
        .fire();

        let home_dir = platform
            .paths
            .home_dir()
            .await
            .map_err(BootstrapError::HomeDirUnavailable)?;

        let services = wire_services(ServiceInputs {
            home_dir,
            fetch,
            cloud_api_url: config.cloud_api_url.clone(),
            git_config: platform.git_config.clone(),
        })?;

        info!("Bootstrap complete");
        Ok(LoadedApp {
            services,
            background,
        })
    }
    .instrument(span)
    .await
}
