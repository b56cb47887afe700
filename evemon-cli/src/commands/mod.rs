//! CLI command implementations.

pub mod cache;
pub mod config;
pub mod documents;
pub mod fetch;
pub mod watch;

use anyhow::{Context, Result};
use clap::Args;
use evemon_core::Credentials;
use evemon_fetch::HttpTransport;
use evemon_store::Config;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Bad command-line input that isn't caught by clap.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required credential was given neither as a flag nor in the
    /// environment.
    #[error("Missing {flag} (or set {env})")]
    MissingCredential {
        /// Flag name.
        flag: &'static str,
        /// Environment variable name.
        env: &'static str,
    },
}

/// API credentials, from flags or the environment.
#[derive(Args, Debug, Default, Clone)]
pub struct CredentialArgs {
    /// Account user ID (legacy) or key ID.
    #[arg(long, env = "EVEMON_USER_ID")]
    pub user_id: Option<String>,

    /// API key (legacy) or verification code.
    #[arg(long, env = "EVEMON_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Character ID, required for character documents.
    #[arg(long, env = "EVEMON_CHARACTER_ID")]
    pub character_id: Option<String>,

    /// Sign requests with userID/apiKey instead of keyID/vCode.
    #[arg(long)]
    pub legacy: bool,
}

impl CredentialArgs {
    /// Credentials for signing requests. Needs the user ID and the key.
    pub fn to_credentials(&self) -> Result<Credentials, InputError> {
        let user_id = self.user_id.clone().ok_or(InputError::MissingCredential {
            flag: "--user-id",
            env: "EVEMON_USER_ID",
        })?;
        let secret = self.api_key.clone().ok_or(InputError::MissingCredential {
            flag: "--api-key",
            env: "EVEMON_API_KEY",
        })?;

        let credentials = if self.legacy {
            Credentials::legacy(user_id, secret)
        } else {
            Credentials::new(user_id, secret)
        };

        Ok(match &self.character_id {
            Some(id) => credentials.with_character(id.clone()),
            None => credentials,
        })
    }

    /// Credentials for locating cache entries. The key is not needed.
    pub fn to_identity(&self) -> Result<Credentials, InputError> {
        let user_id = self.user_id.clone().ok_or(InputError::MissingCredential {
            flag: "--user-id",
            env: "EVEMON_USER_ID",
        })?;

        let credentials = Credentials::new(user_id, String::new());
        Ok(match &self.character_id {
            Some(id) => credentials.with_character(id.clone()),
            None => credentials,
        })
    }
}

/// Loads the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(Config::default_path, Path::to_path_buf);
    Config::load_from(&path).with_context(|| format!("Loading {}", path.display()))
}

/// Builds the HTTP transport shared by every fetcher of one command.
pub fn build_transport(config: &Config) -> Result<Arc<HttpTransport>> {
    let transport = HttpTransport::from_config(config)
        .with_context(|| format!("Invalid API base URL {}", config.api_base_url))?;
    Ok(Arc::new(transport))
}
