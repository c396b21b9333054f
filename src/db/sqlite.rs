// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points.
//
// The free functions in queries.rs remain usable directly, so unit tests
// can exercise them against a Connection without the async wrapper.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::filter::MentionFilter;
use super::models::{DailyVolume, MentionRow, PlatformCount, SentimentCounts, SiteMention};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn mention_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::mention_count(&conn)
    }

    async fn list_mentions(&self, filter: &MentionFilter) -> Result<Vec<MentionRow>> {
        let conn = self.conn.lock().await;
        super::queries::list_mentions(&conn, filter)
    }

    async fn daily_volume(&self, days: u32, filter: &MentionFilter) -> Result<Vec<DailyVolume>> {
        let conn = self.conn.lock().await;
        super::queries::daily_volume(&conn, days, filter)
    }

    async fn sentiment_counts(&self, days: u32) -> Result<SentimentCounts> {
        let conn = self.conn.lock().await;
        super::queries::sentiment_counts(&conn, days)
    }

    async fn platform_counts(&self, filter: &MentionFilter) -> Result<Vec<PlatformCount>> {
        let conn = self.conn.lock().await;
        super::queries::platform_counts(&conn, filter)
    }

    async fn site_mentions(
        &self,
        project_id: Option<&str>,
        start_period: Option<&str>,
        end_period: Option<&str>,
    ) -> Result<Vec<SiteMention>> {
        let conn = self.conn.lock().await;
        super::queries::site_mentions(&conn, project_id, start_period, end_period)
    }
}
