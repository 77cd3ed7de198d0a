//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use poh_core::PohConfig;

use crate::commands::Command;

/// Passport Office Helper
#[derive(Parser, Debug)]
#[command(name = "poh")]
#[command(about = "Passport checks for EarthMC passport officers")]
#[command(disable_help_subcommand = true)]
pub struct Args {
    /// Player lookup endpoint (overrides POH_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Shared ledger URL used by `sync` (overrides POH_SYNC_URL)
    #[arg(long)]
    pub sync_url: Option<String>,

    /// Local passport ledger file (overrides POH_LEDGER)
    #[arg(short, long)]
    pub ledger: Option<PathBuf>,

    /// Request timeout in seconds (overrides POH_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip the ledger sync when the interactive prompt starts
    #[arg(long)]
    pub no_sync: bool,

    /// No spinner output
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a single command instead of the interactive prompt
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Layer the flags that were given over `config`.
    pub fn apply(&self, config: &mut PohConfig) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(url) = &self.sync_url {
            config.sync_url = url.clone();
        }
        if let Some(path) = &self.ledger {
            config.ledger_path = path.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_secs = secs;
        }
    }
}
