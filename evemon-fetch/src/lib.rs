// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `EveMon` Fetch
//!
//! Requests, HTTP transport and cache fallback for EVE API documents.
//!
//! ## Building Blocks
//!
//! - [`request::RequestBuilder`] - Turns a document type and credentials
//!   into a form-encoded POST request
//! - [`transport::Transport`] - Sends requests; [`http::HttpTransport`] is
//!   the reqwest-backed implementation
//! - [`policy`] - Writes fresh documents to the cache and falls back to the
//!   cached copy when the live request fails
//!
//! ## Fetcher
//!
//! [`fetcher::DocumentFetcher`] ties these together for one document and
//! one set of credentials, with blocking, awaitable and spawned entry
//! points.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use evemon_core::{Credentials, DocumentType};
//! use evemon_fetch::{DocumentFetcher, HttpTransport};
//! use evemon_store::CacheStore;
//!
//! let transport = Arc::new(HttpTransport::new("https://api.eveonline.com")?);
//! let creds = Credentials::new("1001", "vcode").with_character("2002");
//! let fetcher = DocumentFetcher::new(
//!     DocumentType::CharacterSheet,
//!     creds,
//!     transport,
//!     CacheStore::new("/var/cache/evemon"),
//! )?;
//!
//! let result = fetcher.fetch().await;
//! if result.locally_cached {
//!     println!("served from cache: {:?}", result.error);
//! }
//! ```

pub mod error;
pub mod fetcher;
pub mod http;
pub mod policy;
pub mod request;
pub mod result;
pub mod transport;

#[cfg(test)]
mod testing;

// Errors
pub use error::{FetchError, TransportError};

// Requests & transport
pub use http::HttpTransport;
pub use request::{ApiRequest, RequestBuilder};
pub use transport::{HTTP_OK, HttpResponse, Transport};

// Fetcher
pub use fetcher::DocumentFetcher;
pub use result::{FetchOutcome, FetchResult};
