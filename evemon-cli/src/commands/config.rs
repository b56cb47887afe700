//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use evemon_store::{Config, default_config_dir};
use std::path::PathBuf;
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli, config),
        ConfigAction::Path => show_paths(cli, config),
        ConfigAction::Init { force } => init_config(cli, *force),
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

fn show_config(cli: &Cli, config: &Config) -> Result<ExitCode> {
    match cli.format {
        OutputFormat::Text => {
            println!("EveMon Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API base URL:     {}", config.api_base_url);
            println!("Cache root:       {}", config.cache_root().display());
            println!("Request timeout:  {}s", config.request_timeout_secs);
            println!("Refresh interval: {}s", config.refresh_interval_secs);
            println!("Log level:        {}", config.log_level);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(config)?);
        }
    }

    Ok(ExitCode::Success)
}

fn show_paths(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let config_dir = default_config_dir();
    let config_file = config_path(cli);
    let sheets_dir = config.cache_store().sheets_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", config_file.display());
            println!("Sheets dir:  {}", sheets_dir.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_file.display().to_string(),
                "sheets_dir": sheets_dir.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(ExitCode::Success)
}

fn init_config(cli: &Cli, force: bool) -> Result<ExitCode> {
    let path = config_path(cli);

    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it");
        return Ok(ExitCode::Error);
    }

    Config::default().save_to(&path)?;

    info!(path = %path.display(), "Configuration initialized");
    println!("Wrote default configuration to {}", path.display());

    Ok(ExitCode::Success)
}
