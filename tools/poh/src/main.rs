//! POH: Passport Office Helper
//!
//! Looks players up on the EarthMC API and answers the two questions a
//! passport officer asks: may this player get a passport, and is the passport
//! they hold still valid.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive prompt (syncs the shared ledger first)
//! poh
//!
//! # One-shot commands
//! poh iseligible Steve
//! poh isvalid all
//! poh --ledger office.pof issue Steve SPE --force
//! ```

mod cli;
mod commands;
mod repl;
mod spinner;

use std::io::IsTerminal;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poh_core::{FileLedger, HttpLedgerSource, HttpPlayerDirectory, PassportOffice, PohConfig};

use cli::Args;
use commands::{Context, Flow};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = PohConfig::from_env();
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let ledger = FileLedger::open(&config.ledger_path).with_context(|| {
        format!("Failed to open ledger {}", config.ledger_path.display())
    })?;
    let directory =
        HttpPlayerDirectory::new(&config).context("Failed to create player API client")?;
    let source = HttpLedgerSource::new(&config).context("Failed to create sync client")?;

    info!(
        "POH v{} using {} and ledger {}",
        commands::VERSION,
        config.api_url,
        config.ledger_path.display()
    );

    let ctx = Context {
        office: PassportOffice::new(directory, ledger).lookup_concurrency(config.lookup_concurrency),
        source,
        spinner: !args.quiet && std::io::stdout().is_terminal(),
    };

    match args.command {
        Some(command) => match commands::execute(command, &ctx).await {
            Ok(Flow::Continue) | Ok(Flow::Quit) => Ok(()),
            Err(e) => {
                eprintln!("{}", repl::render_error(&e));
                std::process::exit(1);
            }
        },
        None => repl::run(&ctx, !args.no_sync).await,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
