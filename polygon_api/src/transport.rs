//! The HTTP seam the client sends requests through.
//!
//! [`Client`](crate::Client) only needs one capability: issue an authenticated
//! GET and hand back the status code and body. [`ReqwestTransport`] is the
//! bundled implementation; tests and embedders can supply their own.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use url::Url;

/// Boxed future returned by [`Transport::get`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>>;

/// Status code and body of a completed HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// A request that never produced an HTTP response.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// Issues authenticated GET requests.
///
/// Implementations own authentication, timeouts and any retry policy. The
/// client calls [`Transport::get`] exactly once per API call.
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: Url) -> TransportFuture<'a>;
}

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// The API key is sent as a bearer token, so it never shows up in request
/// URLs or logs, and it is applied to continuation URLs on any host.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(api_key: &str) -> Result<Self, TransportError> {
        Self::with_options(api_key, DEFAULT_TIMEOUT, &default_user_agent(), &[])
    }

    /// Builds the transport with explicit timeout, user agent and extra headers.
    pub fn with_options(
        api_key: &str,
        timeout: Duration,
        user_agent: &str,
        extra_headers: &[(String, String)],
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| TransportError::Other(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Other(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Other(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Wraps an already configured `reqwest::Client`. No headers are added.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: Url) -> TransportFuture<'a> {
        Box::pin(async move {
            let resp = self.http.get(url).send().await.map_err(|e| {
                tracing::error!("Failed to send request: {}", e);
                TransportError::Http(e)
            })?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await.map_err(|e| {
                tracing::error!("Failed to read response body: {}", e);
                TransportError::Http(e)
            })?;
            Ok(RawResponse::new(status, body.to_vec()))
        })
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("polygon-rs/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(299, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(300, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
    }

    #[test]
    fn rejects_unusable_header() {
        let result = ReqwestTransport::with_options(
            "key",
            DEFAULT_TIMEOUT,
            "ua",
            &[("bad header".to_string(), "x".to_string())],
        );
        assert!(matches!(result, Err(TransportError::Other(_))));
    }

    #[test]
    fn builds_with_defaults() {
        assert!(ReqwestTransport::new("test-key").is_ok());
    }
}
