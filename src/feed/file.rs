//! Play-by-play feed backed by a directory of week documents.
//!
//! Layout: `<data_dir>/<season>/week<WW>.json`, one provider document per week.

use super::play_by_play::parse_week;
use super::types::Game;
use super::PlayFeed;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct FilePlayFeed {
    data_dir: PathBuf,
}

impl FilePlayFeed {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn week_path(&self, season: u16, week: u8) -> PathBuf {
        self.data_dir
            .join(season.to_string())
            .join(format!("week{:02}.json", week))
    }
}

#[async_trait]
impl PlayFeed for FilePlayFeed {
    async fn fetch_week(&self, season: u16, week: u8) -> Result<Vec<Game>> {
        let path = self.week_path(season, week);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let games = parse_week(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::debug!(season, week, games = games.len(), path = %path.display(), "loaded week");
        Ok(games)
    }

    fn name(&self) -> &str {
        "file"
    }
}
