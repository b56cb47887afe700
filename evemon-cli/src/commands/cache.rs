//! Cache command - inspect cached documents.

use anyhow::Result;
use clap::{Args, Subcommand};
use evemon_core::{CacheKey, DocumentType};
use evemon_store::Config;
use std::io::{Write, stdout};

use super::CredentialArgs;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the cache command.
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands.
#[derive(Subcommand)]
pub enum CacheAction {
    /// Show the cache directory.
    Path,

    /// Show the cache entry of one document.
    Show {
        /// Document (characters, charsheet, intraining, skillqueue).
        document: String,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Write the cached document itself to stdout.
        #[arg(long)]
        raw: bool,
    },
}

/// Runs the cache command.
pub fn run(args: &CacheArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &args.action {
        CacheAction::Path => show_path(cli, config),
        CacheAction::Show {
            document,
            credentials,
            raw,
        } => show_entry(document, credentials, *raw, cli, config),
    }
}

fn show_path(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let store = config.cache_store();

    match cli.format {
        OutputFormat::Text => {
            println!("Cache root: {}", store.root().display());
            println!("Sheets dir: {}", store.sheets_dir().display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "cache_root": store.root().display().to_string(),
                "sheets_dir": store.sheets_dir().display().to_string(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(ExitCode::Success)
}

fn show_entry(
    document: &str,
    credentials: &CredentialArgs,
    raw: bool,
    cli: &Cli,
    config: &Config,
) -> Result<ExitCode> {
    let document: DocumentType = document.parse()?;
    let identity = credentials.to_identity()?;
    let key = CacheKey::derive(document, &identity)?;
    let store = config.cache_store();

    if raw {
        return match store.read(&key)? {
            Some(entry) => {
                let mut out = stdout().lock();
                out.write_all(&entry.bytes)?;
                out.flush()?;
                Ok(ExitCode::Success)
            }
            None => Ok(ExitCode::FetchFailed),
        };
    }

    let path = store.path_for(&key);
    let info = store.info(&key);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_entry(document, &path, info.as_ref()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_entry(document, &path, info.as_ref())?);
        }
    }

    Ok(ExitCode::Success)
}
