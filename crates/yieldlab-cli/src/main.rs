//! Yieldlab CLI - command-line interface for bond valuation and yield analytics.
//!
//! # Usage
//!
//! ```bash
//! # Price or solve one request, JSON envelope on stdout
//! yieldlab calc --input request.json
//! cat request.json | yieldlab calc
//!
//! # Cash-flow timetable as a table
//! yieldlab --format table schedule --input request.json
//!
//! # Evaluate an array of requests with custom solver settings
//! yieldlab --config engine.toml batch --input requests.json
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` or pass `--verbose`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use yieldlab_analytics::{AnalyticsEngine, EngineConfig};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading engine settings from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = AnalyticsEngine::with_config(config)?;
    tracing::debug!(?config, "engine ready");

    let format = cli.format;
    let succeeded = match cli.command {
        Commands::Calc(args) => commands::calc::execute(&engine, &args, format)?,
        Commands::Schedule(args) => commands::schedule::execute(&engine, &args, format)?,
        Commands::Batch(args) => commands::batch::execute(&engine, &args, format)?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Installs the stderr subscriber. `--verbose` forces `debug`, otherwise
/// `RUST_LOG` applies with `warn` as the fallback.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
