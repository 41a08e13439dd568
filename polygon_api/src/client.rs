//! HTTP client for the Polygon REST API.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    pagination::Paginated,
    query::{compose_url, Query},
    response,
    transport::{default_user_agent, ReqwestTransport, Transport, DEFAULT_TIMEOUT},
    Error,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "POLYGON_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "POLYGON_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "POLYGON_TIMEOUT_SECS";

/// HTTP client for the Polygon REST API.
///
/// Every endpoint method is a thin wrapper over [`Client::perform`]: it
/// supplies the path with its identifiers filled in, the optional query
/// parameters and the response type. The client keeps no state between
/// calls, so one instance can be shared across tasks.
#[derive(Clone)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://api.polygon.io`.
    base_api_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Self::builder().api_key(api_key).base_url(base_url).build()
    }

    /// Creates a client over any [`Transport`].
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Creates a client from `POLYGON_API_KEY`, `POLYGON_BASE_URL` and
    /// `POLYGON_TIMEOUT_SECS`. Only the API key is required.
    pub fn from_env() -> Result<Self, Error> {
        Self::builder().from_env()?.build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// The request target for `path` and `query` under this client's base URL.
    pub fn url_for<Q: Query + ?Sized>(&self, path: &str, query: Option<&Q>) -> Result<Url, Error> {
        compose_url(&self.base_api_url, path, query).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })
    }

    /// Issues a GET for `path` with `query` and decodes the body into `T`.
    ///
    /// `path` must already contain its identifiers (ticker, contract, date).
    /// Query entries with empty values are left out.
    pub async fn perform<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
        Q: Query + ?Sized,
    {
        let url = self.url_for(path, query)?;
        self.execute(url).await
    }

    /// Fetches a continuation URL exactly as the API returned it.
    ///
    /// The host is not checked against the base URL; the API may serve
    /// later pages from another host.
    pub async fn get_next<T>(&self, next_url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        let url = Url::parse(next_url).map_err(|e| {
            tracing::error!("Invalid continuation URL {}: {}", next_url, e);
            Error::InvalidUrl(e)
        })?;
        self.execute(url).await
    }

    /// Fetches the page after `page`, or `None` if `page` is the last one.
    pub async fn next_page<T>(&self, page: &T) -> Result<Option<T>, Error>
    where
        T: Paginated + DeserializeOwned + Default,
    {
        match page.next_url() {
            Some(next_url) => self.get_next(next_url).await.map(Some),
            None => Ok(None),
        }
    }

    async fn execute<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        tracing::debug!("GET {}", url);
        let raw = self.transport.get(url).await?;
        tracing::debug!("Response status {} ({} bytes)", raw.status, raw.body.len());
        response::resolve(raw)
    }
}

/// Configures a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Replaces the bundled reqwest transport. The API key, timeout, user
    /// agent and headers are then the transport's business and are ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Fills unset fields from the environment.
    pub fn from_env(mut self) -> Result<Self, Error> {
        if self.api_key.is_none() {
            self.api_key = env_non_empty(API_KEY_ENV);
        }
        if self.base_url.is_none() {
            self.base_url = env_non_empty(BASE_URL_ENV);
        }
        if self.timeout.is_none() {
            if let Some(raw) = env_non_empty(TIMEOUT_ENV) {
                let secs = raw.parse::<u64>().map_err(|_| {
                    Error::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw))
                })?;
                self.timeout = Some(Duration::from_secs(secs));
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let api_key = self
                    .api_key
                    .ok_or_else(|| Error::Config(format!("no API key given and {} is not set", API_KEY_ENV)))?;
                let user_agent = self.user_agent.unwrap_or_else(default_user_agent);
                Arc::new(ReqwestTransport::with_options(
                    &api_key,
                    self.timeout.unwrap_or(DEFAULT_TIMEOUT),
                    &user_agent,
                    &self.headers,
                )
                .map_err(|e| Error::Config(e.to_string()))?)
            }
        };

        Ok(Client::with_transport(&base_url, transport))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Params;
    use crate::transport::{RawResponse, TransportError, TransportFuture};
    use crate::types::{Agg, ListResponse};
    use std::sync::Mutex;

    /// Records requested URLs and replays canned responses.
    struct StubTransport {
        responses: Mutex<Vec<Result<RawResponse, TransportError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn new(responses: Vec<Result<RawResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for StubTransport {
        fn get<'a>(&'a self, url: Url) -> TransportFuture<'a> {
            self.seen.lock().unwrap().push(url.to_string());
            let next = self.responses.lock().unwrap().remove(0);
            Box::pin(async move { next })
        }
    }

    #[tokio::test]
    async fn perform_composes_and_resolves() {
        let stub = StubTransport::new(vec![Ok(RawResponse::new(
            200,
            r#"{"status":"OK","results":[{"o":1.0}],"next_url":"https://cdn.example.net/p2?cursor=z"}"#,
        ))]);
        let client = Client::with_transport("https://api.example.com/", stub.clone());
        let params = Params::from([("limit", "1"), ("sort", "")]);

        let page: ListResponse<Agg> = client.perform("/v3/things", Some(&params)).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(
            stub.seen.lock().unwrap().as_slice(),
            ["https://api.example.com/v3/things?limit=1"]
        );
    }

    #[tokio::test]
    async fn next_page_follows_foreign_host_and_stops() {
        let stub = StubTransport::new(vec![Ok(RawResponse::new(
            200,
            r#"{"status":"OK","results":[{"o":2.0}]}"#,
        ))]);
        let client = Client::with_transport("https://api.example.com", stub.clone());
        let first = ListResponse::<Agg> {
            next_url: Some("https://cdn.example.net/p2?cursor=z".to_string()),
            ..Default::default()
        };

        let second = client.next_page(&first).await.unwrap().unwrap();
        assert_eq!(second.results[0].open, 2.0);
        assert!(client.next_page(&second).await.unwrap().is_none());
        assert_eq!(
            stub.seen.lock().unwrap().as_slice(),
            ["https://cdn.example.net/p2?cursor=z"]
        );
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let stub = StubTransport::new(vec![Err(TransportError::Other("connection refused".to_string()))]);
        let client = Client::with_transport("https://api.example.com", stub);
        let err = client
            .perform::<ListResponse<Agg>, Params>("/v3/things", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Other(ref m)) if m == "connection refused"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn builder_requires_api_key_without_transport() {
        let err = Client::builder().base_url("https://api.example.com").build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let err = Client::builder().api_key("k").base_url("::nope").build().unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn unusable_header_values_are_config_errors() {
        let err = Client::with_base_url("https://api.example.com", "bad\nkey").unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("Invalid API key")));

        let err = Client::builder()
            .api_key("k")
            .header("X-Trace", "line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn builder_defaults_to_production() {
        let client = Client::new("k").unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn invalid_continuation_url_is_rejected() {
        let client = Client::with_base_url("https://api.example.com", "k").unwrap();
        let err = client
            .get_next::<ListResponse<Agg>>("/relative/only")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
