//! Watch command - poll documents on an interval.

use anyhow::Result;
use clap::Args;
use evemon_core::{Credentials, DocumentType};
use evemon_fetch::{DocumentFetcher, FetchResult};
use evemon_store::Config;
use futures::future::join_all;
use std::io::{Write, stdout};
use tokio::time::{Duration, interval};
use tracing::info;

use super::{CredentialArgs, build_transport};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Documents to watch. Defaults to every document the credentials
    /// can fetch.
    pub documents: Vec<String>,

    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Refresh interval in seconds (defaults to the configured one).
    #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Minimum interval to use.
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub min_interval: u64,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let refresh_interval = args
        .interval
        .unwrap_or(config.refresh_interval_secs)
        .max(args.min_interval);

    let credentials = args.credentials.to_credentials()?;
    let documents = select_documents(&args.documents, &credentials)?;

    let transport = build_transport(config)?;
    let cache = config.cache_store();
    let fetchers = documents
        .iter()
        .map(|doc| {
            DocumentFetcher::new(*doc, credentials.clone(), transport.clone(), cache.clone())
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        interval = refresh_interval,
        documents = fetchers.len(),
        "Starting watch mode"
    );

    let text = TextFormatter::new(!cli.no_color);
    let json = JsonFormatter::new(cli.pretty);
    let mut ticker = interval(Duration::from_secs(refresh_interval));

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Watch mode interrupted");
                return Ok(ExitCode::Success);
            }
        }

        let results: Vec<FetchResult> = join_all(fetchers.iter().map(|f| f.fetch())).await;

        match cli.format {
            OutputFormat::Text => {
                print!("\x1b[2J\x1b[H");
                stdout().flush()?;

                let header = text.format_watch_header(chrono::Utc::now(), refresh_interval);
                println!("{header}");
                println!();
                println!("{}", text.format_summary(&results));
                println!();
                println!("Press Ctrl+C to exit");
            }
            OutputFormat::Json => {
                let paired: Vec<_> = results
                    .into_iter()
                    .zip(fetchers.iter().map(DocumentFetcher::cache_path))
                    .collect();
                println!("{}", json.format_results(&paired)?);
            }
        }
    }
}

/// Resolves document names, or picks every document the credentials can
/// fetch when none are given.
fn select_documents(names: &[String], credentials: &Credentials) -> Result<Vec<DocumentType>> {
    if names.is_empty() {
        let has_character = credentials.character_id().is_some();
        return Ok(DocumentType::all()
            .iter()
            .copied()
            .filter(|doc| has_character || !doc.is_character_scoped())
            .collect());
    }

    let mut documents = Vec::new();
    for name in names {
        let doc: DocumentType = name.parse()?;
        if !documents.contains(&doc) {
            documents.push(doc);
        }
    }
    Ok(documents)
}

// ============================================================================
// Tests
// ============================================================================
