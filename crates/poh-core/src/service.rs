//! # Passport Office Service
//!
//! Composes the ports: ledger lookup (when needed), then player lookup, then
//! the pure rules in `domain::rules`.

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::errors::PohError;
use crate::domain::passport::{Passport, PassportKind};
use crate::domain::player::Player;
use crate::domain::reports::{EligibilityReport, ValidityReport};
use crate::domain::rules::{self, Eligibility};
use crate::ports::outbound::{Clock, LedgerSource, PassportLedger, PlayerDirectory, SystemClock};

/// Default number of concurrent lookups for [`PassportOffice::check_all`].
pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 4;

/// One row of [`PassportOffice::check_all`].
pub type LedgerCheck = (Passport, Result<ValidityReport, PohError>);

pub struct PassportOffice<D, L, C = SystemClock> {
    directory: D,
    ledger: Mutex<L>,
    clock: C,
    lookup_concurrency: usize,
}

impl<D, L> PassportOffice<D, L, SystemClock>
where
    D: PlayerDirectory,
    L: PassportLedger,
{
    pub fn new(directory: D, ledger: L) -> Self {
        Self::with_clock(directory, ledger, SystemClock)
    }
}

impl<D, L, C> PassportOffice<D, L, C>
where
    D: PlayerDirectory,
    L: PassportLedger,
    C: Clock,
{
    pub fn with_clock(directory: D, ledger: L, clock: C) -> Self {
        Self {
            directory,
            ledger: Mutex::new(ledger),
            clock,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }

    pub fn lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }

    /// Fetch a player record. `Ok(None)` for an unknown username.
    pub async fn player_info(&self, username: &str) -> Result<Option<Player>, PohError> {
        let username = require_username(username)?;
        Ok(self.directory.fetch_player(username).await?)
    }

    /// Whether `username` may be issued a passport.
    pub async fn check_eligibility(&self, username: &str) -> Result<EligibilityReport, PohError> {
        let player = self.require_player(username).await?;
        let verdict = rules::eligibility(player.timestamps.joined_town_at, self.clock.now_millis());
        debug!("Eligibility of {}: {:?}", player.name, verdict);

        Ok(EligibilityReport {
            name: player.name,
            verdict,
        })
    }

    /// Whether the passport held by `username` is still valid.
    ///
    /// The ledger is consulted first; the API is only called for passports
    /// whose validity depends on the holder's activity.
    pub async fn check_validity(&self, username: &str) -> Result<ValidityReport, PohError> {
        let username = require_username(username)?;
        let passport = self.ledger.lock().find(username)?;

        match passport {
            Some(passport) => self.validity_for(passport).await,
            None => Ok(ValidityReport::NoPassport {
                username: username.to_string(),
            }),
        }
    }

    /// Check every passport in the ledger, in ledger order.
    ///
    /// A failed lookup only fails its own row.
    pub async fn check_all(&self) -> Result<Vec<LedgerCheck>, PohError> {
        let passports = self.ledger.lock().passports()?;
        info!("Checking {} passports", passports.len());

        let checks: Vec<LedgerCheck> = stream::iter(passports)
            .map(|passport| async move {
                let report = self.validity_for(passport.clone()).await;
                (passport, report)
            })
            .buffered(self.lookup_concurrency)
            .collect()
            .await;

        Ok(checks)
    }

    /// Issue a passport to `username`.
    ///
    /// The player must exist, and must be eligible unless `force` is set. The
    /// ledger records the name as spelled by the API.
    pub async fn issue(
        &self,
        username: &str,
        kind: PassportKind,
        force: bool,
    ) -> Result<Passport, PohError> {
        let player = self.require_player(username).await?;

        if !force {
            match rules::eligibility(player.timestamps.joined_town_at, self.clock.now_millis()) {
                Eligibility::Eligible { .. } => {}
                Eligibility::NotYet { remaining_ms } => {
                    return Err(PohError::NotEligible {
                        name: player.name,
                        remaining_ms: Some(remaining_ms),
                    })
                }
                Eligibility::NoTown => {
                    return Err(PohError::NotEligible {
                        name: player.name,
                        remaining_ms: None,
                    })
                }
            }
        }

        Ok(self.ledger.lock().issue(&player.name, kind)?)
    }

    /// Remove the passport held by `username`.
    pub fn revoke(&self, username: &str) -> Result<Passport, PohError> {
        let username = require_username(username)?;
        Ok(self.ledger.lock().revoke(username)?)
    }

    /// All passports in ledger order.
    pub fn passports(&self) -> Result<Vec<Passport>, PohError> {
        Ok(self.ledger.lock().passports()?)
    }

    /// Replace the local ledger with the copy served by `source`.
    pub async fn sync_ledger<S>(&self, source: &S) -> Result<usize, PohError>
    where
        S: LedgerSource + ?Sized,
    {
        let raw = source.download().await?;
        let count = self.ledger.lock().import(&raw)?;
        info!("Ledger synced: {} passports", count);
        Ok(count)
    }

    async fn require_player(&self, username: &str) -> Result<Player, PohError> {
        let username = require_username(username)?;
        self.directory
            .fetch_player(username)
            .await?
            .ok_or_else(|| PohError::UnknownPlayer(username.to_string()))
    }

    async fn validity_for(&self, passport: Passport) -> Result<ValidityReport, PohError> {
        if passport.kind.is_special() {
            return Ok(ValidityReport::Checked {
                passport,
                verdict: rules::Validity::Special,
            });
        }

        let Some(player) = self.directory.fetch_player(&passport.username).await? else {
            return Ok(ValidityReport::UnknownPlayer { passport });
        };

        let verdict = rules::validity(
            &passport.kind,
            player.timestamps.last_online,
            self.clock.now_millis(),
        );
        debug!("Validity of {}: {:?}", passport.username, verdict);

        Ok(ValidityReport::Checked { passport, verdict })
    }
}

fn require_username(username: &str) -> Result<&str, PohError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        Err(PohError::MissingUsername)
    } else {
        Ok(trimmed)
    }
}
