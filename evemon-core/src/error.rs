//! Core error types for `EveMon`.

use thiserror::Error;

use crate::models::DocumentType;

/// Errors raised while describing a document request.
///
/// These indicate a mismatch between what the caller asked for and what
/// the API supports. They are raised before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The document type name is not one of the supported documents.
    #[error("Invalid API document type: {0}")]
    InvalidDocumentType(String),

    /// A character-scoped document was requested without a character ID.
    #[error("{0} requires a character ID")]
    MissingCharacterId(DocumentType),

    /// An account or character identifier cannot be used as a cache name.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentity(String),
}
