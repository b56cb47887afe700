//! Fetch error types.

use evemon_core::{CoreError, DocumentType};
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
///
/// Only [`FetchError::Core`] is ever returned as an `Err`, from fetcher
/// construction. All other variants are recorded in a
/// [`FetchResult`](crate::FetchResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be described (unknown document type, missing
    /// character, unusable identifier).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The transport failed before an HTTP response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Another fetch of the same fetcher is still outstanding.
    #[error("A fetch of {0} is already in flight")]
    InFlight(DocumentType),
}

impl FetchError {
    /// Returns true if the error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    /// Returns the HTTP status carried by the error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(status) => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Transport-level failure, distinct from a non-200 HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not connect to the server.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other request or body error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
