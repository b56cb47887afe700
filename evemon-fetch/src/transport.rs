//! Transport abstraction.
//!
//! The fetcher never talks to the network directly. It hands an
//! [`ApiRequest`] to a [`Transport`] and gets back either an HTTP response
//! (any status) or a [`TransportError`].

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::ApiRequest;

/// HTTP status the API answers with on success.
pub const HTTP_OK: u16 = 200;

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Unmodified response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a 200 response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(HTTP_OK, body)
    }

    /// Returns true for status 200.
    pub fn is_ok(&self) -> bool {
        self.status == HTTP_OK
    }
}

/// Executes API requests.
///
/// Implementations report transport failures (connect, timeout) as
/// `Err`, and every HTTP response, whatever its status, as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request without blocking the calling thread.
    async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError>;

    /// Sends the request, blocking the calling thread until it completes.
    ///
    /// Must not be called from within an async runtime.
    fn send_blocking(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError>;
}
