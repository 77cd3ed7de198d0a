//! Player records as returned by the EarthMC `players` endpoint.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Reference to a town or nation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Epoch-millisecond timestamps. Any of them may be `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(default)]
    pub registered: Option<i64>,
    #[serde(default)]
    pub joined_town_at: Option<i64>,
    #[serde(default)]
    pub last_online: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatus {
    pub is_online: bool,
    #[serde(rename = "isNPC")]
    pub is_npc: bool,
    pub is_mayor: bool,
    pub is_king: bool,
    pub has_town: bool,
    pub has_nation: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub balance: f64,
    pub num_friends: u32,
}

/// A player as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub formatted_name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub town: Option<NamedRef>,
    #[serde(default)]
    pub nation: Option<NamedRef>,
    #[serde(default)]
    pub timestamps: Timestamps,
    #[serde(default)]
    pub status: Option<PlayerStatus>,
    #[serde(default)]
    pub stats: Option<PlayerStats>,
}

const NOT_AVAILABLE: &str = "N/A";

impl Player {
    pub fn town_name(&self) -> Option<&str> {
        self.town.as_ref().and_then(|t| t.name.as_deref())
    }

    pub fn nation_name(&self) -> Option<&str> {
        self.nation.as_ref().and_then(|n| n.name.as_deref())
    }

    pub fn is_online(&self) -> bool {
        self.status.map(|s| s.is_online).unwrap_or(false)
    }

    /// Multi-line description for the `playerinfo` command.
    pub fn summary(&self) -> String {
        let text = |value: Option<&str>| -> String {
            match value {
                Some(v) if !v.trim().is_empty() => v.to_string(),
                _ => NOT_AVAILABLE.to_string(),
            }
        };

        let lines = [
            ("Name", self.name.clone()),
            ("UUID", text(self.uuid.as_deref())),
            ("Title", text(self.title.as_deref())),
            ("Surname", text(self.surname.as_deref())),
            ("About", text(self.about.as_deref())),
            ("Town", text(self.town_name())),
            ("Nation", text(self.nation_name())),
            ("Registered", format_timestamp(self.timestamps.registered)),
            ("Joined Town", format_timestamp(self.timestamps.joined_town_at)),
            ("Last Online", format_timestamp(self.timestamps.last_online)),
            (
                "Online",
                if self.is_online() { "yes" } else { "no" }.to_string(),
            ),
        ];

        lines
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Local-time rendering of an epoch-millisecond timestamp.
pub fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
