// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `EveMon` Core
//!
//! Core types shared by all other `EveMon` crates.
//!
//! ## Key Types
//!
//! - [`DocumentType`] - The fixed set of API documents that can be requested
//! - [`Credentials`] / [`AuthScheme`] - Identity and secret used to sign requests
//! - [`CacheKey`] - Deterministic name of a document's on-disk fallback entry
//! - [`CoreError`] - Errors raised while deriving requests or keys

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{AuthScheme, CacheKey, Credentials, DocumentScope, DocumentType};
