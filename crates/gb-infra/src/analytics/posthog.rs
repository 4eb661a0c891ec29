//! Product telemetry over the PostHog capture API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gb_core::ports::SubsystemActivatorPort;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::{debug, info};
use uuid::Uuid;

const LAUNCH_EVENT: &str = "app_launched";

#[derive(Debug, Serialize)]
struct CapturePayload<'a> {
    api_key: &'a str,
    event: &'a str,
    distinct_id: &'a str,
    properties: Value,
    timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct PostHogClient {
    http: Client,
    capture_url: String,
    api_key: String,
    distinct_id: String,
}

impl PostHogClient {
    fn payload<'a>(
        &'a self,
        event: &'a str,
        properties: Value,
        timestamp: DateTime<Utc>,
    ) -> CapturePayload<'a> {
        CapturePayload {
            api_key: &self.api_key,
            event,
            distinct_id: &self.distinct_id,
            properties,
            timestamp,
        }
    }

    async fn capture(&self, event: &str, properties: Value) -> Result<()> {
        let payload = self.payload(event, properties, Utc::now());
        let response = self
            .http
            .post(&self.capture_url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("send telemetry event {event} failed"))?;

        if !response.status().is_success() {
            bail!("telemetry endpoint returned {} for {event}", response.status());
        }
        debug!(event, "Telemetry event captured");
        Ok(())
    }
}

/// Telemetry subsystem. Inert until [`activate`](SubsystemActivatorPort::activate)
/// succeeds once.
#[derive(Debug)]
pub struct PostHogTelemetry {
    api_key: String,
    host: String,
    client: OnceCell<PostHogClient>,
}

impl PostHogTelemetry {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: host.into(),
            client: OnceCell::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.client.initialized()
    }

    fn capture_url(&self) -> String {
        format!("{}/capture/", self.host.trim_end_matches('/'))
    }

    fn build_client(&self) -> Result<PostHogClient> {
        if self.api_key.trim().is_empty() {
            bail!("telemetry api key is not configured");
        }
        if self.host.trim().is_empty() {
            bail!("telemetry host is not configured");
        }

        Ok(PostHogClient {
            http: Client::builder()
                .build()
                .context("build telemetry http client failed")?,
            capture_url: self.capture_url(),
            api_key: self.api_key.clone(),
            distinct_id: Uuid::new_v4().to_string(),
        })
    }

    /// Send `event` if telemetry is active, otherwise do nothing.
    pub async fn capture(&self, event: &str, properties: Value) -> Result<()> {
        match self.client.get() {
            Some(client) => client.capture(event, properties).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SubsystemActivatorPort for PostHogTelemetry {
    fn name(&self) -> &'static str {
        "telemetry"
    }

    async fn activate(&self) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }

        let client = self
            .client
            .get_or_try_init(|| async { self.build_client() })
            .await?;
        info!(url = %client.capture_url, "Telemetry enabled");

        client
            .capture(
                LAUNCH_EVENT,
                json!({ "appVersion": env!("CARGO_PKG_VERSION"), "os": std::env::consts::OS }),
            )
            .await
    }
}
