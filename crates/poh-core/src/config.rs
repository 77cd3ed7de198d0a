//! # Configuration
//!
//! Defaults, then `POH_*` environment overrides, then whatever the CLI sets
//! on top.
//!
//! | Field | Environment |
//! |-------|-------------|
//! | `api_url` | `POH_API_URL` |
//! | `sync_url` | `POH_SYNC_URL` |
//! | `ledger_path` | `POH_LEDGER` |
//! | `user_agent` | `POH_USER_AGENT` |
//! | `request_timeout_secs` | `POH_TIMEOUT_SECS` |
//! | `lookup_concurrency` | `POH_CONCURRENCY` |

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

/// Player endpoint of the EarthMC Aurora API.
pub const DEFAULT_API_URL: &str = "https://api.earthmc.net/v3/aurora/players";

/// Shared copy of the ledger maintained by the passport office.
pub const DEFAULT_SYNC_URL: &str =
    "https://raw.githubusercontent.com/AEuovi/CLI-POH/main/LocalPassports.pof";

pub const DEFAULT_LEDGER_PATH: &str = "LocalPassports.pof";

/// The API rejects some non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.86 Safari/537.36";

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PohConfig {
    /// Player lookup endpoint (POST).
    pub api_url: String,
    /// Remote ledger copy (GET).
    pub sync_url: String,
    /// Local ledger file.
    pub ledger_path: PathBuf,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout.
    pub request_timeout_secs: u64,
    /// TCP connect timeout.
    pub connect_timeout_secs: u64,
    /// Player lookups in flight during `isvalid all`.
    pub lookup_concurrency: usize,
}

impl Default for PohConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            sync_url: DEFAULT_SYNC_URL.to_string(),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            lookup_concurrency: 4,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

impl PohConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PohConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("POH_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = lookup("POH_SYNC_URL") {
            config.sync_url = url;
        }
        if let Some(path) = lookup("POH_LEDGER") {
            info!("Using ledger path from environment: {}", path);
            config.ledger_path = PathBuf::from(path);
        }
        if let Some(agent) = lookup("POH_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = parse_var(&lookup, "POH_TIMEOUT_SECS") {
            config.request_timeout_secs = secs;
        }
        if let Some(n) = parse_var(&lookup, "POH_CONCURRENCY") {
            config.lookup_concurrency = n;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Empty { field: "api_url" });
        }
        if self.sync_url.trim().is_empty() {
            return Err(ConfigError::Empty { field: "sync_url" });
        }
        if self.ledger_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty {
                field: "ledger_path",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "request_timeout_secs",
            });
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "connect_timeout_secs",
            });
        }
        if self.lookup_concurrency == 0 {
            return Err(ConfigError::Zero {
                field: "lookup_concurrency",
            });
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
