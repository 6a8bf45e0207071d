use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use super::provider::GameFeed;
use crate::game::Game;

/// Feed document shared by every source: `{"games": [...]}`.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    games: Vec<Game>,
}

pub fn parse_snapshot(raw: &str) -> Result<Vec<Game>> {
    let snapshot: Snapshot =
        serde_json::from_str(raw).context("Failed to parse game snapshot")?;
    Ok(snapshot.games)
}

/// Play-by-play feed polled over HTTP.
pub struct HttpFeed {
    http: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpFeed {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl GameFeed for HttpFeed {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_games(&self) -> Result<Vec<Game>> {
        debug!("Fetching games from {}", self.url);

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Feed request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Feed error: {}", resp.status());
        }

        let body = resp.text().await.context("Failed to read feed response")?;
        parse_snapshot(&body)
    }
}

/// Snapshot file re-read on every poll; useful for replaying a captured feed.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFeed { path: path.into() }
    }
}

#[async_trait]
impl GameFeed for FileFeed {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_games(&self) -> Result<Vec<Game>> {
        debug!("Reading games from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        parse_snapshot(&raw)
    }
}
