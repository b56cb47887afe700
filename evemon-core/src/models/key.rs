//! Cache key derivation.

use serde::Serialize;
use std::fmt;

use super::credentials::Credentials;
use super::document::{DocumentScope, DocumentType};
use crate::error::CoreError;

/// Name of a document's cache entry: `<identity>_<DocumentName>`.
///
/// The identity is the account ID for account-scoped documents and the
/// character ID for everything else. Identities are restricted to ASCII
/// alphanumerics, `-` and `_` so that keys map one-to-one onto file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a document requested with the given credentials.
    pub fn derive(doc: DocumentType, credentials: &Credentials) -> Result<Self, CoreError> {
        let identity = match doc.scope() {
            DocumentScope::Account => credentials.user_id.as_str(),
            DocumentScope::Character => credentials
                .character_id()
                .ok_or(CoreError::MissingCharacterId(doc))?,
        };
        validate_identity(identity)?;

        Ok(Self(format!("{identity}_{}", doc.doc_name())))
    }

    /// Returns the key as a file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_identity(identity: &str) -> Result<(), CoreError> {
    let valid = !identity.is_empty()
        && identity
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidIdentity(identity.to_string()))
    }
}
