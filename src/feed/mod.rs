pub mod file;
pub mod http;
pub mod play_by_play;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::Game;

/// Source of play-by-play data, one regular-season week at a time.
#[async_trait]
pub trait PlayFeed: Send + Sync {
    async fn fetch_week(&self, season: u16, week: u8) -> Result<Vec<Game>>;
    fn name(&self) -> &str;
}
