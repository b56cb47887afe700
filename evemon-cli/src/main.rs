// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! EveMon CLI - fetch EVE API documents with offline fallback.
//!
//! # Examples
//!
//! ```bash
//! # Fetch a character sheet (credentials from flags or environment)
//! evemon fetch charsheet --user-id 1001 --api-key SECRET --character-id 2002
//!
//! # Print the document itself instead of a summary
//! EVEMON_USER_ID=1001 EVEMON_API_KEY=SECRET EVEMON_CHARACTER_ID=2002 \
//!     evemon fetch skillqueue --raw
//!
//! # JSON output
//! evemon --format json --pretty fetch characters
//!
//! # Poll every document once a minute
//! evemon watch --interval 60
//!
//! # Where is the cached copy?
//! evemon cache show charsheet --user-id 1001 --character-id 2002
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use evemon_core::CoreError;
use evemon_fetch::FetchError;
use evemon_store::{Config, StoreError};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{cache, config, documents, fetch, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// EveMon CLI - EVE API document fetching.
#[derive(Parser)]
#[command(name = "evemon")]
#[command(about = "Fetch EVE Online API documents with a local fallback cache")]
#[command(long_about = r#"
EveMon fetches character documents from the EVE Online XML API and keeps
the last good copy of each one on disk. When the API is unreachable or
returns an error, the cached copy is served instead.

Documents:
  characters   Characters.xml       (account)
  charsheet    CharacterSheet.xml   (character)
  intraining   SkillInTraining.xml  (character)
  skillqueue   SkillQueue.xml       (character)

Examples:
  evemon fetch charsheet --user-id 1001 --api-key SECRET --character-id 2002
  evemon --format json fetch characters
  evemon watch charsheet skillqueue --interval 120
  evemon cache path
"#)]
#[command(version)]
#[command(author = "EveMon Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file to use instead of the default one.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error messages).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one document, falling back to the cache on failure.
    #[command(visible_alias = "f")]
    Fetch(fetch::FetchArgs),

    /// Fetch documents repeatedly.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Inspect the document cache.
    #[command(visible_alias = "c")]
    Cache(cache::CacheArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),

    /// List the documents that can be fetched.
    #[command(visible_alias = "d")]
    Documents,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Neither the API nor the cache produced the document.
    FetchFailed = 2,
    /// Unknown document, missing credentials or bad configuration.
    InvalidInput = 3,
}

impl ExitCode {
    /// Picks the exit code for an error returned by a command.
    fn for_error(error: &anyhow::Error) -> Self {
        if error.downcast_ref::<CoreError>().is_some()
            || error.downcast_ref::<commands::InputError>().is_some()
            || matches!(error.downcast_ref::<FetchError>(), Some(FetchError::Core(_)))
            || matches!(error.downcast_ref::<StoreError>(), Some(StoreError::Config(_)))
        {
            Self::InvalidInput
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("evemon=debug,info")
    } else {
        EnvFilter::try_new(format!("evemon={level}"))
            .unwrap_or_else(|_| EnvFilter::new("evemon=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = commands::load_config(cli.config.as_deref());
    let level = loaded.as_ref().map_or("warn", |c| c.log_level.as_str());
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match loaded {
        Ok(config) => dispatch(&cli, &config).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };

    if code != ExitCode::Success {
        std::process::exit(code as i32);
    }

    Ok(())
}

async fn dispatch(cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &cli.command {
        Commands::Fetch(args) => fetch::run(args, cli, config).await,
        Commands::Watch(args) => watch::run(args, cli, config).await,
        Commands::Cache(args) => cache::run(args, cli, config),
        Commands::Config(args) => config::run(args, cli, config),
        Commands::Documents => documents::run(cli),
    }
}

// ============================================================================
// Tests
// ============================================================================
