//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BatchArgs, InputArgs};

/// Yieldlab - bond valuation and yield analytics
#[derive(Parser)]
#[command(name = "yieldlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Engine settings file (TOML)
    #[arg(short, long, global = true, env = "YIELDLAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log calculation steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond or solve its yield, with risk metrics
    Calc(InputArgs),

    /// Print the cash-flow schedule of a bond
    Schedule(InputArgs),

    /// Evaluate a JSON array of requests
    Batch(BatchArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Response envelope as JSON
    #[default]
    Json,
    /// Human-readable tables
    Table,
}
