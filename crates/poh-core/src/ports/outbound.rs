//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the passport office service.
//!
//! Production: `HttpPlayerDirectory`, `HttpLedgerSource`, `FileLedger`, `SystemClock`
//! Testing: `InMemoryLedger`, `FixedClock` and hand-written directories

use async_trait::async_trait;

use crate::domain::errors::{LedgerError, LookupError};
use crate::domain::passport::{Passport, PassportKind};
use crate::domain::player::Player;

/// Looks players up by username.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Fetch a single player. `Ok(None)` means the username is unknown.
    async fn fetch_player(&self, username: &str) -> Result<Option<Player>, LookupError>;
}

/// The local record of issued passports.
pub trait PassportLedger: Send {
    /// All passport rows in ledger order.
    fn passports(&self) -> Result<Vec<Passport>, LedgerError>;

    /// First row whose username matches, ignoring case.
    fn find(&self, username: &str) -> Result<Option<Passport>, LedgerError> {
        Ok(self
            .passports()?
            .into_iter()
            .find(|p| p.belongs_to(username)))
    }

    /// Append a new row with the next sequential id.
    fn issue(&mut self, username: &str, kind: PassportKind) -> Result<Passport, LedgerError>;

    /// Remove the row for `username`, keeping every other line in order.
    fn revoke(&mut self, username: &str) -> Result<Passport, LedgerError>;

    /// Replace the whole ledger with `raw`. Returns the number of passport rows.
    fn import(&mut self, raw: &str) -> Result<usize, LedgerError>;
}

/// Where a shared copy of the ledger can be downloaded from.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn download(&self) -> Result<String, LookupError>;
}

/// Current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
