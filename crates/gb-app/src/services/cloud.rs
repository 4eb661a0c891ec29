use std::fmt;
use std::sync::Arc;

use gb_core::ports::FetchPort;
use gb_core::{HttpMethod, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info_span, Instrument};
use url::Url;

const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("invalid cloud API base url: {0:?}")]
    InvalidBaseUrl(String),

    #[error("cloud API returned {status} for {method} {url}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("failed to encode or decode cloud API payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Client for the GitButler cloud API.
///
/// All traffic goes through the injected [`FetchPort`], so the host decides
/// which transport backs the client.
pub struct CloudClient {
    fetch: Arc<dyn FetchPort>,
    base_url: String,
}

impl fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CloudClient {
    /// # Errors
    ///
    /// `CloudError::InvalidBaseUrl` unless `base_url` is an http(s) URL with
    /// a host.
    pub fn new(fetch: Arc<dyn FetchPort>, base_url: impl Into<String>) -> Result<Self, CloudError> {
        let base_url = base_url.into();
        let parsed = match Url::parse(&base_url) {
            Ok(parsed) => parsed,
            Err(_) => return Err(CloudError::InvalidBaseUrl(base_url)),
        };
        let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());
        if !matches!(parsed.scheme(), "http" | "https") || !has_host {
            return Err(CloudError::InvalidBaseUrl(base_url));
        }

        let mut base_url = String::from(parsed);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { fetch, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `api/user.json`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<HttpResponse, CloudError> {
        self.send(HttpMethod::Get, path, token, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<HttpResponse, CloudError> {
        let body = serde_json::to_vec(body)?;
        self.send(HttpMethod::Post, path, token, Some(body)).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, CloudError> {
        Ok(self.get(path, token).await?.json()?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, CloudError> {
        Ok(self.post(path, token, body).await?.json()?)
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        token: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, CloudError> {
        let url = self.endpoint(path);
        let span = info_span!("cloud.request", method = method.as_str(), url = %url);

        async move {
            let mut request = HttpRequest::new(method, url.clone());
            if let Some(token) = token {
                request = request.header(AUTH_HEADER, token);
            }
            if let Some(body) = body {
                request = request
                    .header("Content-Type", "application/json")
                    .body(body);
            }

            let response = self.fetch.fetch(request).await?;
            debug!(status = response.status, "Cloud API responded");

            if !response.is_success() {
                return Err(CloudError::Status {
                    method: method.as_str(),
                    url,
                    status: response.status,
                });
            }
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use serde::Deserialize;

    mock! {
        pub Fetch {}

        #[async_trait]
        impl FetchPort for Fetch {
            async fn fetch(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        ok: bool,
    }

    fn client(mock: MockFetch) -> CloudClient {
        CloudClient::new(Arc::new(mock), "https://cloud.test").unwrap()
    }

    #[test]
    fn rejects_invalid_base_urls() {
        for bad in [
            "",
            "cloud.test",
            "ftp://cloud.test",
            "https://",
            "https://exa mple.com",
            "https://host:notaport/",
        ] {
            let result = CloudClient::new(Arc::new(MockFetch::new()), bad);
            assert!(
                matches!(result, Err(CloudError::InvalidBaseUrl(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let client = CloudClient::new(Arc::new(MockFetch::new()), "http://localhost:8080/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/");
        assert_eq!(client.endpoint("user.json"), "http://localhost:8080/api/user.json");
    }

    #[test]
    fn construction_does_not_fetch() {
        // MockFetch panics on any unexpected call.
        let client = client(MockFetch::new());
        assert_eq!(client.base_url(), "https://cloud.test/");
        assert_eq!(client.endpoint("/api/user.json"), "https://cloud.test/api/user.json");
    }

    #[tokio::test]
    async fn get_sends_auth_header() {
        let mut fetch = MockFetch::new();
        fetch
            .expect_fetch()
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url == "https://cloud.test/api/user.json"
                    && request.header_value("x-auth-token") == Some("tok")
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, br#"{"ok":true}"#.to_vec())));

        let echo: Echo = client(fetch)
            .get_json("api/user.json", Some("tok"))
            .await
            .unwrap();
        assert_eq!(echo, Echo { ok: true });
    }

    #[tokio::test]
    async fn post_encodes_json_body() {
        let mut fetch = MockFetch::new();
        fetch
            .expect_fetch()
            .withf(|request| {
                request.method == HttpMethod::Post
                    && request.header_value("content-type") == Some("application/json")
                    && request.header_value("x-auth-token").is_none()
                    && request.body.as_deref() == Some(br#"{"name":"gb"}"#.as_slice())
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(201, br#"{"ok":true}"#.to_vec())));

        let echo: Echo = client(fetch)
            .post_json("projects.json", None, &serde_json::json!({"name": "gb"}))
            .await
            .unwrap();
        assert!(echo.ok);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut fetch = MockFetch::new();
        fetch
            .expect_fetch()
            .returning(|_| Ok(HttpResponse::new(401, Vec::new())));

        let err = client(fetch).get("api/user.json", None).await.unwrap_err();
        assert!(matches!(err, CloudError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let mut fetch = MockFetch::new();
        fetch
            .expect_fetch()
            .returning(|_| Err(anyhow::anyhow!("offline")));

        let err = client(fetch).get("api/user.json", None).await.unwrap_err();
        assert!(matches!(err, CloudError::Transport(_)));
        assert!(err.to_string().contains("offline"));
    }
}
