//! # Errors
//!
//! - `LookupError`: anything that went wrong talking to a remote endpoint
//! - `LedgerError`: local ledger file failures and rule violations
//! - `PohError`: what the service reports back to the CLI

use thiserror::Error;

use super::rules::format_duration;

/// Errors from the player API or the ledger download.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Errors from the local passport ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid username '{0}' (no commas or spaces allowed)")]
    InvalidUsername(String),
    #[error("Invalid passport type {0:?} (no commas or control characters allowed)")]
    InvalidKind(String),
    #[error("No passport ids left after {0}")]
    IdsExhausted(String),
    #[error("{username} already holds passport {id}")]
    AlreadyIssued { username: String, id: String },
    #[error("{0}: No passport found")]
    NotFound(String),
}

/// Service-level errors.
#[derive(Debug, Error)]
pub enum PohError {
    #[error("You must provide a username.")]
    MissingUsername,
    #[error("Unknown username: {0}")]
    UnknownPlayer(String),
    #[error("{name} is NOT eligible ({}).", describe_wait(.remaining_ms))]
    NotEligible {
        name: String,
        remaining_ms: Option<i64>,
    },
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

fn describe_wait(remaining_ms: &Option<i64>) -> String {
    match *remaining_ms {
        Some(ms) => format!("{} left", format_duration(ms)),
        None => "not a member of any town".to_string(),
    }
}
