//! # Domain Layer
//!
//! Entities and pure rules. No I/O happens below this module.

pub mod errors;
pub mod passport;
pub mod player;
pub mod reports;
pub mod rules;

pub use errors::{LedgerError, LookupError, PohError};
pub use passport::{Passport, PassportId, PassportKind, LEDGER_HEADER};
pub use player::{NamedRef, Player, PlayerStats, PlayerStatus, Timestamps};
pub use reports::{EligibilityReport, ValidityReport};
pub use rules::{Eligibility, Validity};
