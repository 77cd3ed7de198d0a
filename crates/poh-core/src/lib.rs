//! # Passport Office Helper Core
//!
//! Decides passport eligibility and validity for EarthMC players and keeps
//! the local ledger of issued passports.
//!
//! ## Flow
//!
//! ```text
//! command ──→ ledger lookup (isvalid) ──→ player lookup (HTTP POST) ──→ rules ──→ report
//! ```
//!
//! ## Rules
//!
//! | Verdict | Measured from | Threshold |
//! |---------|---------------|-----------|
//! | Eligible | `joinedTownAt` | ≥ 14 days |
//! | Valid | `lastOnline` | ≤ 14 days |
//! | Grace | `lastOnline` | ≤ 30 days |
//! | Special (`SPE`) | - | always valid |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, pure rules, reports and errors
//! - `ports/` - Driven port traits (player directory, ledger, clock)
//! - `adapters/` - reqwest, file and in-memory implementations
//! - `service.rs` - `PassportOffice` composing the ports
//! - `config.rs` - Defaults and `POH_*` environment overrides
//!
//! ## Usage
//!
//! ```ignore
//! use poh_core::{FileLedger, HttpPlayerDirectory, PassportOffice, PohConfig};
//!
//! let config = PohConfig::from_env();
//! let office = PassportOffice::new(
//!     HttpPlayerDirectory::new(&config)?,
//!     FileLedger::open(&config.ledger_path)?,
//! );
//!
//! println!("{}", office.check_validity("Steve").await?);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileLedger, HttpLedgerSource, HttpPlayerDirectory, InMemoryLedger};
pub use config::{ConfigError, PohConfig};
pub use domain::{
    Eligibility, EligibilityReport, LedgerError, LookupError, Passport, PassportId, PassportKind,
    Player, PohError, Validity, ValidityReport,
};
pub use ports::{Clock, FixedClock, LedgerSource, PassportLedger, PlayerDirectory, SystemClock};
pub use service::{LedgerCheck, PassportOffice};
