//! CLI argument parsing for quay.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quay: ships sharing a port warehouse through a handful of berths.
///
/// Each ship runs on its own thread, moors at a free berth, moves containers
/// between its own warehouse and the port's, and sails off again.
#[derive(Parser, Debug)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for quay.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the harbor for a fixed time.
    ///
    /// Builds the port and ships from the config, lets every ship sail and
    /// trade until the duration elapses, then verifies that every container
    /// is still accounted for.
    Run(RunArgs),

    /// Write a default configuration file.
    Init(InitArgs),

    /// Validate a configuration file without running anything.
    Check(CheckArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the YAML config (defaults are used when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override how long ships sail, in seconds.
    #[arg(short, long)]
    pub duration_secs: Option<u64>,

    /// Override the seed for ship decisions.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append events to this NDJSON file.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Override the log format (compact, pretty, json).
    #[arg(long)]
    pub log_format: Option<String>,

    /// Print the final report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the config.
    #[arg(default_value = "quay.yaml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the YAML config.
    pub path: PathBuf,

    /// Also summarize an NDJSON event log from an earlier run.
    #[arg(long)]
    pub events: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
