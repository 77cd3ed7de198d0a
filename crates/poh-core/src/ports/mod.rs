//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (player API, ledger, clock)

pub mod outbound;

pub use outbound::{Clock, FixedClock, LedgerSource, PassportLedger, PlayerDirectory, SystemClock};
