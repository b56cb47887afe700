//! Fetch command - one document, with cache fallback.

use anyhow::Result;
use clap::Args;
use evemon_fetch::{DocumentFetcher, FetchResult};
use evemon_store::Config;
use std::io::{Write, stdout};
use tracing::{debug, info};

use super::{CredentialArgs, build_transport};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Document to fetch (characters, charsheet, intraining, skillqueue).
    pub document: String,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Write the document itself to stdout instead of a summary.
    #[arg(long)]
    pub raw: bool,
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let credentials = args.credentials.to_credentials()?;
    let transport = build_transport(config)?;
    let fetcher = DocumentFetcher::for_document_name(
        &args.document,
        credentials,
        transport,
        config.cache_store(),
    )?;

    info!(document = %fetcher.document(), "Fetching document");
    let result = fetcher.fetch().await;
    debug!(outcome = ?result.outcome(), status = result.http_status, "Fetch finished");

    output_result(&result, &fetcher, args, cli)?;

    Ok(exit_code(&result))
}

/// `FetchFailed` when neither the API nor the cache produced the document.
fn exit_code(result: &FetchResult) -> ExitCode {
    if result.has_payload() {
        ExitCode::Success
    } else {
        ExitCode::FetchFailed
    }
}

fn output_result(
    result: &FetchResult,
    fetcher: &DocumentFetcher,
    args: &FetchArgs,
    cli: &Cli,
) -> Result<()> {
    if args.raw {
        if let Some(payload) = &result.payload {
            let mut out = stdout().lock();
            out.write_all(payload)?;
            out.flush()?;
        }
        return Ok(());
    }

    let cache_path = fetcher.cache_path();
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_result(result, &cache_path));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_result(result, &cache_path, true)?);
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
