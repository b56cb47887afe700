//! API credentials.

use std::fmt;

// ============================================================================
// Auth Scheme
// ============================================================================

/// Which of the two API authentication schemes the credentials use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// Legacy full/limited API keys (`userID` + `apiKey`).
    Legacy,
    /// Customizable API keys (`keyID` + `vCode`).
    #[default]
    Key,
}

impl AuthScheme {
    /// Form field carrying the user or key identifier.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Legacy => "userID",
            Self::Key => "keyID",
        }
    }

    /// Form field carrying the secret.
    pub fn secret_field(&self) -> &'static str {
        match self {
            Self::Legacy => "apiKey",
            Self::Key => "vCode",
        }
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Identity and secret used to authenticate a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User ID (legacy) or key ID.
    pub user_id: String,
    /// API key (legacy) or verification code.
    pub secret: String,
    /// Character the request is about, if any.
    pub character_id: Option<String>,
    /// Authentication scheme.
    pub scheme: AuthScheme,
}

impl Credentials {
    /// Creates key-based credentials without a character.
    pub fn new(user_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            secret: secret.into(),
            character_id: None,
            scheme: AuthScheme::Key,
        }
    }

    /// Creates legacy credentials without a character.
    pub fn legacy(user_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            scheme: AuthScheme::Legacy,
            ..Self::new(user_id, secret)
        }
    }

    /// Sets the character the credentials refer to.
    #[must_use]
    pub fn with_character(mut self, character_id: impl Into<String>) -> Self {
        self.character_id = Some(character_id.into());
        self
    }

    /// Returns the character ID, treating an empty string as absent.
    pub fn character_id(&self) -> Option<&str> {
        self.character_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns true for legacy credentials.
    pub fn is_legacy(&self) -> bool {
        self.scheme == AuthScheme::Legacy
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .field("character_id", &self.character_id)
            .field("scheme", &self.scheme)
            .finish()
    }
}
