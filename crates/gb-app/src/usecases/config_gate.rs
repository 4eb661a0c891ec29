//! Config Gate
//!
//! Reads the two opt-in flags and activates error reporting and telemetry
//! when they are on. Both checks run as detached tasks: bootstrap never waits
//! on them and a failed read leaves the subsystem off without surfacing an
//! error.

use std::sync::Arc;

use gb_core::ports::{AppSettingsPort, SubsystemActivatorPort};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::task::{spawn_detached, DetachedTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFlag {
    ErrorReporting,
    Telemetry,
}

impl ConfigFlag {
    /// Settings key the flag is stored under.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFlag::ErrorReporting => "appErrorReportingEnabled",
            ConfigFlag::Telemetry => "appMetricsEnabled",
        }
    }
}

/// Handles to the two gate checks, mostly useful to tests and shutdown.
#[derive(Debug)]
pub struct ConfigGateTasks {
    pub error_reporting: DetachedTask,
    pub telemetry: DetachedTask,
}

impl ConfigGateTasks {
    pub async fn join(self) {
        self.error_reporting.join().await;
        self.telemetry.join().await;
    }
}

#[derive(Clone)]
pub struct ConfigGate {
    settings: Arc<dyn AppSettingsPort>,
    telemetry: Arc<dyn SubsystemActivatorPort>,
    error_reporting: Arc<dyn SubsystemActivatorPort>,
}

impl ConfigGate {
    pub fn new(
        settings: Arc<dyn AppSettingsPort>,
        telemetry: Arc<dyn SubsystemActivatorPort>,
        error_reporting: Arc<dyn SubsystemActivatorPort>,
    ) -> Self {
        Self {
            settings,
            telemetry,
            error_reporting,
        }
    }

    /// Read `flag` from the persisted settings.
    ///
    /// A failed read is logged and counts as `false`.
    pub async fn check_flag(&self, flag: ConfigFlag) -> bool {
        let read = match flag {
            ConfigFlag::ErrorReporting => self.settings.is_error_reporting_enabled().await,
            ConfigFlag::Telemetry => self.settings.is_telemetry_enabled().await,
        };

        match read {
            Ok(enabled) => enabled,
            Err(err) => {
                warn!(flag = flag.name(), error = %format!("{err:#}"), "Failed to read config flag");
                false
            }
        }
    }

    fn activator(&self, flag: ConfigFlag) -> &Arc<dyn SubsystemActivatorPort> {
        match flag {
            ConfigFlag::ErrorReporting => &self.error_reporting,
            ConfigFlag::Telemetry => &self.telemetry,
        }
    }

    /// Check `flag` and activate its subsystem when it is on.
    async fn gate(&self, flag: ConfigFlag) -> anyhow::Result<()> {
        let span = info_span!("usecase.config_gate.gate", flag = flag.name());

        async {
            if !self.check_flag(flag).await {
                debug!("Flag disabled, subsystem stays off");
                return Ok(());
            }

            let activator = self.activator(flag);
            activator.activate().await?;
            info!(subsystem = activator.name(), "Subsystem activated");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Start both checks, error reporting first, and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fire(&self) -> ConfigGateTasks {
        let gate = self.clone();
        let error_reporting = spawn_detached("config_gate.error_reporting", async move {
            gate.gate(ConfigFlag::ErrorReporting).await
        });

        let gate = self.clone();
        let telemetry = spawn_detached("config_gate.telemetry", async move {
            gate.gate(ConfigFlag::Telemetry).await
        });

        ConfigGateTasks {
            error_reporting,
            telemetry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        pub Settings {}

        #[async_trait]
        impl AppSettingsPort for Settings {
            async fn is_telemetry_enabled(&self) -> anyhow::Result<bool>;
            async fn is_error_reporting_enabled(&self) -> anyhow::Result<bool>;
        }
    }

    /// Counts activations instead of asserting inside a detached task.
    struct CountingActivator {
        name: &'static str,
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingActivator {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubsystemActivatorPort for CountingActivator {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn activate(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("{} failed to start", self.name);
            }
            Ok(())
        }
    }

    fn settings(telemetry: anyhow::Result<bool>, errors: anyhow::Result<bool>) -> MockSettings {
        let mut settings = MockSettings::new();
        let mut telemetry = Some(telemetry);
        let mut errors = Some(errors);
        settings
            .expect_is_telemetry_enabled()
            .times(1)
            .returning(move || telemetry.take().unwrap());
        settings
            .expect_is_error_reporting_enabled()
            .times(1)
            .returning(move || errors.take().unwrap());
        settings
    }

    #[test]
    fn flag_names_match_settings_keys() {
        assert_eq!(ConfigFlag::ErrorReporting.name(), "appErrorReportingEnabled");
        assert_eq!(ConfigFlag::Telemetry.name(), "appMetricsEnabled");
    }

    #[tokio::test]
    async fn activates_only_enabled_subsystems() {
        let errors = CountingActivator::new("error_reporting");
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings(Ok(true), Ok(false))),
            telemetry.clone(),
            errors.clone(),
        );

        gate.fire().join().await;

        assert_eq!(telemetry.calls(), 1);
        assert_eq!(errors.calls(), 0);
    }

    #[tokio::test]
    async fn activates_both_when_both_enabled() {
        let errors = CountingActivator::new("error_reporting");
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings(Ok(true), Ok(true))),
            telemetry.clone(),
            errors.clone(),
        );

        gate.fire().join().await;

        assert_eq!(telemetry.calls(), 1);
        assert_eq!(errors.calls(), 1);
    }

    #[tokio::test]
    async fn read_failures_leave_subsystems_off() {
        let errors = CountingActivator::new("error_reporting");
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings(
                Err(anyhow::anyhow!("settings unreadable")),
                Err(anyhow::anyhow!("settings unreadable")),
            )),
            telemetry.clone(),
            errors.clone(),
        );

        gate.fire().join().await;

        assert_eq!(telemetry.calls(), 0);
        assert_eq!(errors.calls(), 0);
    }

    #[tokio::test]
    async fn one_failing_read_does_not_block_the_other() {
        let errors = CountingActivator::new("error_reporting");
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings(Ok(true), Err(anyhow::anyhow!("boom")))),
            telemetry.clone(),
            errors.clone(),
        );

        gate.fire().join().await;

        assert_eq!(telemetry.calls(), 1);
        assert_eq!(errors.calls(), 0);
    }

    #[tokio::test]
    async fn activation_failure_is_swallowed() {
        let errors = CountingActivator::failing("error_reporting");
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings(Ok(true), Ok(true))),
            telemetry.clone(),
            errors.clone(),
        );

        gate.fire().join().await;

        assert_eq!(errors.calls(), 1);
        assert_eq!(telemetry.calls(), 1);
    }

    #[tokio::test]
    async fn check_flag_treats_read_errors_as_disabled() {
        let mut settings = MockSettings::new();
        settings.expect_is_telemetry_enabled().returning(|| Ok(true));
        settings
            .expect_is_error_reporting_enabled()
            .returning(|| Err(anyhow::anyhow!("settings unreadable")));
        let telemetry = CountingActivator::new("telemetry");
        let gate = ConfigGate::new(
            Arc::new(settings),
            telemetry.clone(),
            CountingActivator::new("error_reporting"),
        );

        assert!(gate.check_flag(ConfigFlag::Telemetry).await);
        assert!(!gate.check_flag(ConfigFlag::ErrorReporting).await);
        // Checking alone never activates anything.
        assert_eq!(telemetry.calls(), 0);
    }
}
