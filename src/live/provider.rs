use anyhow::Result;
use async_trait::async_trait;

use crate::game::Game;

/// Trait that every play-by-play source must implement.
#[async_trait]
pub trait GameFeed: Send + Sync {
    /// Return a snapshot of every game the source currently knows about,
    /// with full drive and play history.
    async fn fetch_games(&self) -> Result<Vec<Game>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
