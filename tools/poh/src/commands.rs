//! Office commands, shared by the one-shot CLI and the interactive prompt.

use clap::Subcommand;
use poh_core::{
    FileLedger, HttpLedgerSource, HttpPlayerDirectory, LedgerCheck, PassportKind, PassportOffice,
    PohError,
};
use thiserror::Error;

use crate::spinner;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Office = PassportOffice<HttpPlayerDirectory, FileLedger>;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Displays the command list
    Help,
    /// Outputs the version
    Version,
    /// Outputs all relevant info about a player
    #[command(name = "playerinfo")]
    PlayerInfo { username: String },
    /// Checks if the player is eligible for a passport
    #[command(name = "iseligible")]
    IsEligible { username: String },
    /// Checks if a passport is still valid (`all` checks the whole ledger)
    #[command(name = "isvalid")]
    IsValid { target: String },
    /// Issues a passport and records it in the local ledger
    Issue {
        username: String,
        /// Passport type code (STD or SPE)
        #[arg(default_value = "STD", value_parser = parse_issue_kind)]
        kind: PassportKind,
        /// Issue even if the player is not eligible yet
        #[arg(long)]
        force: bool,
    },
    /// Removes a passport from the local ledger
    Revoke { username: String },
    /// Replaces the local ledger with the shared copy
    Sync,
    /// Exits POH
    #[command(alias = "exit")]
    Quit,
}

/// A prompt line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Unknown command")]
    UnknownCommand(String),
    #[error("Unknown passport type '{0}' (expected STD or SPE)")]
    UnknownKind(String),
}

/// Passport types an officer may issue.
pub fn parse_issue_kind(code: &str) -> Result<PassportKind, PromptError> {
    PassportKind::issuable(code).ok_or_else(|| PromptError::UnknownKind(code.to_string()))
}

impl Command {
    /// Parse one prompt line. The command word is case-insensitive; the
    /// arguments keep their case. Missing usernames become empty strings so
    /// the office reports them.
    pub fn parse_line(line: &str) -> Result<Option<Command>, PromptError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let mut arg = || words.next().unwrap_or_default().to_string();

        let command = match word.to_ascii_lowercase().as_str() {
            "help" => Command::Help,
            "version" => Command::Version,
            "playerinfo" => Command::PlayerInfo { username: arg() },
            "iseligible" => Command::IsEligible { username: arg() },
            "isvalid" => Command::IsValid { target: arg() },
            "issue" => {
                let username = arg();
                let kind = match arg() {
                    code if code.is_empty() => PassportKind::Standard,
                    code => parse_issue_kind(&code)?,
                };
                let force = arg().eq_ignore_ascii_case("true");
                Command::Issue {
                    username,
                    kind,
                    force,
                }
            }
            "revoke" => Command::Revoke { username: arg() },
            "sync" => Command::Sync,
            "quit" | "exit" => Command::Quit,
            _ => return Err(PromptError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }
}

/// Whether the prompt keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a command needs to run.
pub struct Context {
    pub office: Office,
    pub source: HttpLedgerSource,
    pub spinner: bool,
}

pub fn help_text() -> &'static str {
    "Valid commands:
    Help : Displays this list
    Version : Outputs the version
    PlayerInfo <Username> : Outputs all relevant info about a player
    IsEligible <Username> : Checks if the player is eligible for a passport
    IsValid <Username | all> : Checks if a passport is still valid
    Issue <Username> [Type] [Override] : Records a new passport (Type defaults to STD)
    Revoke <Username> : Removes a passport from the local list
    Sync : Updates the local passport list
    Quit : Exits POH"
}

pub fn version_line() -> String {
    format!("Passport Office Helper (POH) v{}", VERSION)
}

/// Output lines for `isvalid all`, in ledger order.
pub fn render_checks(checks: &[LedgerCheck]) -> Vec<String> {
    if checks.is_empty() {
        return vec!["No passports found.".to_string()];
    }

    checks
        .iter()
        .map(|(passport, report)| match report {
            Ok(report) => format!("({}) {}", passport.id, report),
            Err(e) => format!(
                "({}) Error checking validity for {}: {}",
                passport.id, passport.username, e
            ),
        })
        .collect()
}

/// Run one command, printing its output. Errors are returned for the caller
/// to report.
pub async fn execute(command: Command, ctx: &Context) -> Result<Flow, PohError> {
    match command {
        Command::Help => println!("{}", help_text()),
        Command::Version => println!("{}", version_line()),
        Command::PlayerInfo { username } => {
            let label = format!("Fetching user {}", username.trim());
            match spinner::track(label, ctx.spinner, ctx.office.player_info(&username)).await? {
                Some(player) => println!("{}", player.summary()),
                None => println!("Unknown username."),
            }
        }
        Command::IsEligible { username } => {
            let label = format!("Fetching user {}", username.trim());
            let report =
                spinner::track(label, ctx.spinner, ctx.office.check_eligibility(&username)).await?;
            println!("{}", report);
        }
        Command::IsValid { target } if target.eq_ignore_ascii_case("all") => {
            let checks = spinner::track(
                "Checking all passports".to_string(),
                ctx.spinner,
                ctx.office.check_all(),
            )
            .await?;

            for line in render_checks(&checks) {
                println!("{}", line);
            }
        }
        Command::IsValid { target } => {
            let label = format!("Checking passport of {}", target.trim());
            let report =
                spinner::track(label, ctx.spinner, ctx.office.check_validity(&target)).await?;
            println!("{}", report);
        }
        Command::Issue {
            username,
            kind,
            force,
        } => {
            let label = format!("Fetching user {}", username.trim());
            let passport =
                spinner::track(label, ctx.spinner, ctx.office.issue(&username, kind, force))
                    .await?;
            println!(
                "Issued {} passport {} to {}",
                passport.kind, passport.id, passport.username
            );
        }
        Command::Revoke { username } => {
            let passport = ctx.office.revoke(&username)?;
            println!("Revoked passport {} of {}", passport.id, passport.username);
        }
        Command::Sync => {
            let count =
                spinner::track("Syncing".to_string(), ctx.spinner, ctx.office.sync_ledger(&ctx.source))
                    .await?;
            println!("File synced successfully ({} passports).", count);
        }
        Command::Quit => {
            println!("Thank you for using POH, have a nice day!");
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}
