//! Domain models for `EveMon`.
//!
//! ## Submodules
//!
//! - [`document`] - Document types and their endpoint table
//! - [`credentials`] - Authentication data for API requests
//! - [`key`] - Cache key derivation

pub mod credentials;
pub mod document;
pub mod key;

pub use credentials::{AuthScheme, Credentials};
pub use document::{DocumentScope, DocumentType};
pub use key::CacheKey;
