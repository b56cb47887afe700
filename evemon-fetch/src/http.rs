//! HTTP transport on top of reqwest.
//!
//! Async requests go through a shared [`reqwest::Client`]. The blocking
//! client is only built the first time a blocking request is made, so an
//! application that never uses the blocking path never pays for its
//! internal runtime.

use async_trait::async_trait;
use evemon_store::Config;
use reqwest::header::CONTENT_TYPE;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::TransportError;
use crate::request::ApiRequest;
use crate::transport::{HttpResponse, Transport};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for EveMon.
const USER_AGENT: &str = concat!("EveMon/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Transport
// ============================================================================

/// [`Transport`] that talks to the API over HTTP(S).
///
/// The blocking client owns a runtime of its own; if it has been used, the
/// transport must be dropped outside of any async runtime.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
    blocking: OnceLock<reqwest::blocking::Client>,
}

impl HttpTransport {
    /// Creates a transport for the given base URL with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url =
            Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url,
            timeout,
            client,
            blocking: OnceLock::new(),
        })
    }

    /// Creates a transport from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::with_timeout(&config.api_base_url, config.request_timeout())
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the full URL for a request.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        self.base_url
            .join(request.path())
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, TransportError> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(self.blocking.get_or_init(|| client))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(path = request.path()))]
    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(request)?;
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, ApiRequest::CONTENT_TYPE)
            .body(request.body())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, size = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }

    #[instrument(skip(self, request), fields(path = request.path()))]
    fn send_blocking(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(request)?;
        debug!(url = %url, "Blocking POST request");

        let response = self
            .blocking_client()?
            .post(url)
            .header(CONTENT_TYPE, ApiRequest::CONTENT_TYPE)
            .body(request.body())
            .send()?;

        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        debug!(status, size = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Tests
// ============================================================================
