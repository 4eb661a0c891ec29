//! Crash and error reporting through Sentry.
//!
//! The tracing subscriber always carries a `sentry-tracing` layer. It stays
//! inert until [`SentryErrorReporting`] binds a client, so enabling error
//! reporting later in startup needs no subscriber changes.

use std::sync::OnceLock;

use anyhow::{bail, Context};
use async_trait::async_trait;
use gb_core::ports::SubsystemActivatorPort;
use ::sentry::{types::Dsn, ClientInitGuard, ClientOptions, Hub};
use ::tracing::info;

static SENTRY_GUARD: OnceLock<ClientInitGuard> = OnceLock::new();

pub struct SentryErrorReporting {
    dsn: String,
}

impl SentryErrorReporting {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self { dsn: dsn.into() }
    }

    fn parse_dsn(&self) -> anyhow::Result<Dsn> {
        if self.dsn.trim().is_empty() {
            bail!("sentry dsn is not configured");
        }
        self.dsn
            .trim()
            .parse::<Dsn>()
            .context("sentry dsn is invalid")
    }

    pub fn is_active() -> bool {
        SENTRY_GUARD.get().is_some()
    }
}

#[async_trait]
impl SubsystemActivatorPort for SentryErrorReporting {
    fn name(&self) -> &'static str {
        "error_reporting"
    }

    async fn activate(&self) -> anyhow::Result<()> {
        if Self::is_active() {
            return Ok(());
        }
        let dsn = self.parse_dsn()?;

        SENTRY_GUARD.get_or_init(|| {
            let guard = ::sentry::init(ClientOptions {
                dsn: Some(dsn),
                release: ::sentry::release_name!(),
                traces_sample_rate: 0.1,
                ..Default::default()
            });
            // `init` binds the client to this thread's hub only. Activation
            // runs on a runtime worker, so bind the main hub as well.
            Hub::main().bind_client(Hub::current().client());
            guard
        });
        info!("Error reporting enabled");
        Ok(())
    }
}
