//! Request construction.
//!
//! Turns a document type and credentials into the endpoint path and form
//! body the API expects. Pure; no I/O.

use evemon_core::{CoreError, Credentials, DocumentType};
use std::fmt;
use url::form_urlencoded;

use crate::error::FetchError;

/// Form field carrying the character ID.
const CHARACTER_FIELD: &str = "characterID";

// ============================================================================
// Api Request
// ============================================================================

/// A fully described API request: always a form-encoded POST.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    document: DocumentType,
    form: Vec<(&'static str, String)>,
    secret_field: &'static str,
}

impl ApiRequest {
    /// HTTP method used for all documents.
    pub const METHOD: &'static str = "POST";

    /// Content type of the body.
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    /// The requested document.
    pub fn document(&self) -> DocumentType {
        self.document
    }

    /// Endpoint path, e.g. `/char/SkillQueue.xml.aspx`.
    pub fn path(&self) -> &'static str {
        self.document.path()
    }

    /// Form fields in request order.
    pub fn form(&self) -> &[(&'static str, String)] {
        &self.form
    }

    /// Returns the value of a form field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Encodes the form as a request body.
    pub fn body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form: Vec<(&str, &str)> = self
            .form
            .iter()
            .map(|(k, v)| {
                if *k == self.secret_field {
                    (*k, "<redacted>")
                } else {
                    (*k, v.as_str())
                }
            })
            .collect();

        f.debug_struct("ApiRequest")
            .field("document", &self.document)
            .field("path", &self.path())
            .field("form", &form)
            .finish()
    }
}

// ============================================================================
// Request Builder
// ============================================================================

/// Builds [`ApiRequest`]s.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds the request for `document`.
    ///
    /// The character ID is sent whenever the credentials carry one; it is
    /// required for character-scoped documents.
    pub fn build(
        document: DocumentType,
        credentials: &Credentials,
    ) -> Result<ApiRequest, FetchError> {
        let character_id = credentials.character_id();
        if document.is_character_scoped() && character_id.is_none() {
            return Err(CoreError::MissingCharacterId(document).into());
        }

        let scheme = credentials.scheme;
        let mut form = vec![
            (scheme.id_field(), credentials.user_id.clone()),
            (scheme.secret_field(), credentials.secret.clone()),
        ];
        if let Some(id) = character_id {
            form.push((CHARACTER_FIELD, id.to_string()));
        }

        Ok(ApiRequest {
            document,
            form,
            secret_field: scheme.secret_field(),
        })
    }

    /// Builds the request for a document given by name.
    ///
    /// Fails with `InvalidDocumentType` for names that aren't documents.
    pub fn build_named(name: &str, credentials: &Credentials) -> Result<ApiRequest, FetchError> {
        let document: DocumentType = name.parse()?;
        Self::build(document, credentials)
    }
}
