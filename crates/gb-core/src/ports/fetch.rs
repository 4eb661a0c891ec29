use async_trait::async_trait;

use crate::http::{HttpRequest, HttpResponse};

/// Request capability injected by the caller of the bootstrap.
///
/// The caller decides the transport, so different hosts (a real network
/// client, a test double, an in-process bridge) can drive the same services.
#[async_trait]
pub trait FetchPort: Send + Sync {
    async fn fetch(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}
