//! Fetch results.

use chrono::{DateTime, Utc};
use evemon_core::DocumentType;
use evemon_store::CacheError;
use std::borrow::Cow;

use crate::error::{FetchError, TransportError};
use crate::transport::{HttpResponse, HTTP_OK};

// ============================================================================
// Fetch Outcome
// ============================================================================

/// Terminal state of a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The live request returned 200.
    Succeeded,
    /// The live request failed and the cached copy was served instead.
    FailedWithFallback,
    /// The live request failed and there was nothing to fall back to.
    FailedNoFallback,
}

// ============================================================================
// Fetch Result
// ============================================================================

/// What a fetch produced.
///
/// A 200 result never carries an error and is never locally cached. A
/// failed result either carries the cached payload with
/// `locally_cached == true`, or no payload at all; in both cases the error
/// from the live attempt is kept.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Document that was fetched.
    pub document: DocumentType,
    /// Response body, or the cached copy after a failure.
    pub payload: Option<Vec<u8>>,
    /// HTTP status of the live attempt, 0 if no response was received.
    pub http_status: u16,
    /// Why the live attempt failed.
    pub error: Option<FetchError>,
    /// True if `payload` came from the cache instead of the network.
    pub locally_cached: bool,
    /// Cache problem encountered while handling the result.
    pub cache_error: Option<CacheError>,
    /// When the attempt completed.
    pub fetched_at: DateTime<Utc>,
}

impl FetchResult {
    /// Builds the result of a live attempt, before any cache handling.
    ///
    /// Bodies of non-200 responses are dropped.
    pub fn from_response(
        document: DocumentType,
        response: Result<HttpResponse, TransportError>,
    ) -> Self {
        match response {
            Ok(response) if response.is_ok() => Self::fresh(document, response.body),
            Ok(response) => {
                let status = response.status;
                Self::failed(document, status, FetchError::HttpStatus(status))
            }
            Err(e) => Self::failed(document, 0, FetchError::Transport(e)),
        }
    }

    /// A successful live result.
    pub fn fresh(document: DocumentType, payload: Vec<u8>) -> Self {
        Self {
            document,
            payload: Some(payload),
            http_status: HTTP_OK,
            error: None,
            locally_cached: false,
            cache_error: None,
            fetched_at: Utc::now(),
        }
    }

    /// A failed live result without payload.
    pub fn failed(document: DocumentType, http_status: u16, error: FetchError) -> Self {
        Self {
            document,
            payload: None,
            http_status,
            error: Some(error),
            locally_cached: false,
            cache_error: None,
            fetched_at: Utc::now(),
        }
    }

    /// A fetch that was refused because another one was still in flight.
    pub fn rejected(document: DocumentType) -> Self {
        Self::failed(document, 0, FetchError::InFlight(document))
    }

    /// Substitutes the cached copy for the missing payload.
    #[must_use]
    pub fn with_cached_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self.locally_cached = true;
        self
    }

    /// Records a cache problem.
    #[must_use]
    pub fn with_cache_error(mut self, error: CacheError) -> Self {
        self.cache_error = Some(error);
        self
    }

    /// Returns true if the live attempt returned 200.
    pub fn is_success(&self) -> bool {
        self.http_status == HTTP_OK && self.error.is_none()
    }

    /// Returns true if there is a payload, fresh or cached.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Classifies the result.
    pub fn outcome(&self) -> FetchOutcome {
        if self.is_success() {
            FetchOutcome::Succeeded
        } else if self.locally_cached && self.payload.is_some() {
            FetchOutcome::FailedWithFallback
        } else {
            FetchOutcome::FailedNoFallback
        }
    }

    /// Payload as text, replacing invalid UTF-8.
    pub fn payload_text(&self) -> Option<Cow<'_, str>> {
        self.payload.as_deref().map(String::from_utf8_lossy)
    }
}
