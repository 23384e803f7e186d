use super::play_by_play::parse_week;
use super::types::Game;
use super::PlayFeed;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Play-by-play feed served over HTTP: `GET <base_url>/<season>/<week>`
/// returning the same week document the file feed reads.
pub struct HttpPlayFeed {
    client: Client,
    base_url: String,
}

impl HttpPlayFeed {
    pub fn new(base_url: &str, request_timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .build()
            .context("failed to build reqwest client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, season: u16, week: u8) -> String {
        format!("{}/{}/{}", self.base_url, season, week)
    }
}

#[async_trait]
impl PlayFeed for HttpPlayFeed {
    async fn fetch_week(&self, season: u16, week: u8) -> Result<Vec<Game>> {
        let url = self.build_url(season, week);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("play-by-play API error ({}): {}", status, body);
        }

        let body = resp.text().await.context("failed to read play-by-play body")?;
        let games = parse_week(&body)?;
        tracing::debug!(season, week, games = games.len(), "fetched week");
        Ok(games)
    }

    fn name(&self) -> &str {
        "http"
    }
}
