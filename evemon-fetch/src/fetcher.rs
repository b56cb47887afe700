//! Document fetcher.
//!
//! A [`DocumentFetcher`] owns one document type and one set of
//! credentials. The request and cache key are derived when the fetcher is
//! built, so a bad document type or identity is reported before any I/O.
//!
//! There are three ways to run a fetch, all finishing with the same cache
//! policy (see [`crate::policy`]):
//!
//! - [`DocumentFetcher::fetch`] - await the result
//! - [`DocumentFetcher::fetch_blocking`] - block the calling thread
//! - [`DocumentFetcher::fetch_async`] / [`DocumentFetcher::fetch_with_callback`] -
//!   run on a spawned task and deliver the result through a channel or a
//!   callback
//!
//! A fetcher runs at most one fetch at a time. A fetch issued while another
//! is outstanding is rejected with [`FetchError::InFlight`] without
//! touching the transport or the cache.

use evemon_core::{CacheKey, Credentials, DocumentType};
use evemon_store::CacheStore;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::error::FetchError;
use crate::policy;
use crate::request::{ApiRequest, RequestBuilder};
use crate::result::FetchResult;
use crate::transport::Transport;

// ============================================================================
// Busy Guard
// ============================================================================

/// Holds the busy flag for the duration of one fetch.
///
/// Clears the flag when dropped, including when the fetch future is
/// cancelled or panics.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ============================================================================
// Document Fetcher
// ============================================================================

/// Fetches one API document with cache fallback.
pub struct DocumentFetcher {
    document: DocumentType,
    credentials: Credentials,
    request: ApiRequest,
    key: CacheKey,
    transport: Arc<dyn Transport>,
    cache: CacheStore,
    busy: Arc<AtomicBool>,
}

impl DocumentFetcher {
    /// Creates a fetcher.
    ///
    /// Fails if the document needs a character the credentials don't have,
    /// or if the identifiers can't be used as cache names.
    pub fn new(
        document: DocumentType,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
        cache: CacheStore,
    ) -> Result<Self, FetchError> {
        let request = RequestBuilder::build(document, &credentials)?;
        let key = CacheKey::derive(document, &credentials)?;

        Ok(Self {
            document,
            credentials,
            request,
            key,
            transport,
            cache,
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Creates a fetcher for a document given by name (`charsheet`,
    /// `SkillQueue.xml`, ...).
    ///
    /// Unknown names fail with `InvalidDocumentType`.
    pub fn for_document_name(
        name: &str,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
        cache: CacheStore,
    ) -> Result<Self, FetchError> {
        let document: DocumentType = name.parse()?;
        Self::new(document, credentials, transport, cache)
    }

    /// The document this fetcher requests.
    pub fn document(&self) -> DocumentType {
        self.document
    }

    /// The credentials requests are signed with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Key of this document's cache entry.
    pub fn cache_key(&self) -> &CacheKey {
        &self.key
    }

    /// Location of this document's cache entry.
    pub fn cache_path(&self) -> PathBuf {
        self.cache.path_for(&self.key)
    }

    /// Returns true while a fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Fetches the document on the async transport.
    pub async fn fetch(&self) -> FetchResult {
        match BusyGuard::acquire(&self.busy) {
            Some(guard) => self.run(guard).await,
            None => self.reject(),
        }
    }

    /// Fetches the document, blocking the calling thread.
    ///
    /// Must not be called from within an async runtime.
    #[instrument(skip(self), fields(document = %self.document))]
    pub fn fetch_blocking(&self) -> FetchResult {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return self.reject();
        };

        info!(key = %self.key, "Requesting document");
        let response = self.transport.send_blocking(&self.request);
        policy::apply(&self.cache, &self.key, self.document, response)
    }

    /// Starts a fetch on the current tokio runtime and returns a channel
    /// that receives the result.
    ///
    /// The busy flag is taken before this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn fetch_async(self: &Arc<Self>) -> oneshot::Receiver<FetchResult> {
        let (tx, rx) = oneshot::channel();
        self.fetch_with_callback(move |result| {
            let _ = tx.send(result);
        });
        rx
    }

    /// Starts a fetch on the current tokio runtime and calls `on_done`
    /// exactly once with the result, from the task that completed it.
    ///
    /// The busy flag is taken before this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn fetch_with_callback<F>(self: &Arc<Self>, on_done: F) -> JoinHandle<()>
    where
        F: FnOnce(FetchResult) + Send + 'static,
    {
        let guard = BusyGuard::acquire(&self.busy);
        let this = Arc::clone(self);

        tokio::spawn(async move {
            let result = match guard {
                Some(guard) => this.run(guard).await,
                None => this.reject(),
            };
            on_done(result);
        })
    }

    #[instrument(skip(self, _guard), fields(document = %self.document))]
    async fn run(&self, _guard: BusyGuard) -> FetchResult {
        info!(key = %self.key, "Requesting document");
        let response = self.transport.send(&self.request).await;
        policy::apply(&self.cache, &self.key, self.document, response)
    }

    fn reject(&self) -> FetchResult {
        warn!(document = %self.document, "Fetch already in flight, rejecting");
        FetchResult::rejected(self.document)
    }
}

impl std::fmt::Debug for DocumentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentFetcher")
            .field("document", &self.document)
            .field("credentials", &self.credentials)
            .field("key", &self.key)
            .field("cache", &self.cache)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}
