//! Documents command - list fetchable documents.

use anyhow::Result;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the documents command.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_documents());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_documents()?);
        }
    }

    Ok(ExitCode::Success)
}
