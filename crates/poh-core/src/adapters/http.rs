//! HTTP adapters for the EarthMC player API and the shared ledger copy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

use crate::config::PohConfig;
use crate::domain::errors::LookupError;
use crate::domain::player::Player;
use crate::ports::outbound::{LedgerSource, PlayerDirectory};

/// Request body of the `players` endpoint.
#[derive(Debug, Serialize)]
struct PlayerQuery<'a> {
    query: [&'a str; 1],
}

fn build_client(config: &PohConfig) -> Result<Client, LookupError> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(LookupError::Http)
}

fn classify(err: reqwest::Error, url: &str) -> LookupError {
    if err.is_connect() {
        LookupError::Connection(format!("Cannot connect to {}", url))
    } else {
        LookupError::Http(err)
    }
}

/// Player lookups against the EarthMC API.
pub struct HttpPlayerDirectory {
    client: Client,
    api_url: String,
}

impl HttpPlayerDirectory {
    pub fn new(config: &PohConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(config)?,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl PlayerDirectory for HttpPlayerDirectory {
    async fn fetch_player(&self, username: &str) -> Result<Option<Player>, LookupError> {
        debug!("POST {} for player {}", self.api_url, username);

        let response = self
            .client
            .post(&self.api_url)
            .header(header::ACCEPT, "application/json")
            .json(&PlayerQuery { query: [username] })
            .send()
            .await
            .map_err(|e| classify(e, &self.api_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url: self.api_url.clone(),
            });
        }

        let body = response.text().await.map_err(LookupError::Http)?;
        parse_players(&body)
    }
}

/// First player of a `players` response, `None` for an empty array.
pub fn parse_players(body: &str) -> Result<Option<Player>, LookupError> {
    let players: Vec<Player> =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    Ok(players.into_iter().next())
}

/// Downloads the shared ledger file.
pub struct HttpLedgerSource {
    client: Client,
    sync_url: String,
}

impl HttpLedgerSource {
    pub fn new(config: &PohConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(config)?,
            sync_url: config.sync_url.clone(),
        })
    }
}

#[async_trait]
impl LedgerSource for HttpLedgerSource {
    async fn download(&self) -> Result<String, LookupError> {
        debug!("GET {}", self.sync_url);

        let response = self
            .client
            .get(&self.sync_url)
            .send()
            .await
            .map_err(|e| classify(e, &self.sync_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url: self.sync_url.clone(),
            });
        }

        response.text().await.map_err(LookupError::Http)
    }
}
