//! # Adapters
//!
//! - `http` - EarthMC player API and shared ledger download (reqwest)
//! - `file` - Ledger file on local disk
//! - `memory` - Ledger held in memory, for tests

pub mod file;
pub mod http;
mod lines;
pub mod memory;

pub use file::FileLedger;
pub use http::{HttpLedgerSource, HttpPlayerDirectory};
pub use memory::InMemoryLedger;
