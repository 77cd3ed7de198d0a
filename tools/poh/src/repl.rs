//! Interactive prompt.

use std::io::Write;

use anyhow::{Context as _, Result};
use poh_core::PohError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::commands::{self, Command, Context, Flow, PromptError};

const BANNER: &str = "\
 ____   ___  _   _
|  _ \\ / _ \\| | | |
| |_) | | | | |_| |
|  __/| |_| |  _  |
|_|    \\___/|_| |_|
Welcome to the Passport Office Helper (POH)";

/// Read commands from stdin until `quit` or end of input.
pub async fn run(ctx: &Context, sync_on_start: bool) -> Result<()> {
    if sync_on_start {
        // A failed startup sync keeps the existing local ledger.
        if let Err(e) = commands::execute(Command::Sync, ctx).await {
            warn!("Startup sync failed: {}", e);
            println!("Failed to sync file: {}", e);
        }
    }

    println!("{}", BANNER);
    println!("{}", commands::help_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to write prompt")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };
        debug!("Prompt input: {:?}", line);

        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                if let PromptError::UnknownCommand(word) = &e {
                    debug!("Unknown command word {:?}", word);
                }
                println!("Error: {}", e);
                continue;
            }
        };

        match commands::execute(command, ctx).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => println!("{}", render_error(&e)),
        }
    }

    Ok(())
}

/// Prompt-facing text for a failed command.
pub fn render_error(err: &PohError) -> String {
    match err {
        PohError::UnknownPlayer(_) | PohError::NotEligible { .. } => err.to_string(),
        _ => format!("Error: {}", err),
    }
}
