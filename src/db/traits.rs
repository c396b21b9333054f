// Database trait — backend-agnostic async interface for all read queries.
//
// Implementor: SqliteDatabase (wraps rusqlite behind a tokio Mutex). The
// trait mirrors the queries.rs function signatures, so handlers depend on
// `Arc<dyn Database>` instead of a concrete connection.

use anyhow::Result;
use async_trait::async_trait;

use super::filter::MentionFilter;
use super::models::{DailyVolume, MentionRow, PlatformCount, SentimentCounts, SiteMention};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Total number of stored mentions.
    async fn mention_count(&self) -> Result<i64>;

    // --- Read projections ---

    /// Mentions listing: newest first, joined project keyword, capped at 50.
    async fn list_mentions(&self, filter: &MentionFilter) -> Result<Vec<MentionRow>>;

    /// Daily mention volume and summed reach over the lookback window.
    async fn daily_volume(&self, days: u32, filter: &MentionFilter) -> Result<Vec<DailyVolume>>;

    /// Positive/neutral/negative counts over the lookback window.
    async fn sentiment_counts(&self, days: u32) -> Result<SentimentCounts>;

    /// Mention count per social network, descending.
    async fn platform_counts(&self, filter: &MentionFilter) -> Result<Vec<PlatformCount>>;

    /// Url-bearing rows feeding the site aggregator, newest first.
    async fn site_mentions(
        &self,
        project_id: Option<&str>,
        start_period: Option<&str>,
        end_period: Option<&str>,
    ) -> Result<Vec<SiteMention>>;
}
