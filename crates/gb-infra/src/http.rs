//! `FetchPort` backed by a shared `reqwest` client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gb_core::ports::FetchPort;
use gb_core::{HttpMethod, HttpRequest, HttpResponse};
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: Client,
}

impl ReqwestFetch {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gitbutler/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client failed")?;
        Ok(Self { client })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl FetchPort for ReqwestFetch {
    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(method(request.method), request.url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{} {} failed", request.method.as_str(), request.url))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .context("read response body failed")?
            .to_vec();

        debug!(status, url = %request.url, "HTTP request completed");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
