// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.
//
// The mentions/projects tables mirror what the ingest backend writes; this
// service only ever reads them.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )
    .context("Failed to create schema_version table")?;

    // Migration v1: base tables and indexes.
    run_migration(conn, 1, |c| {
        c.execute_batch(
            "
            -- Monitoring projects (one per tracked brand/keyword setup)
            CREATE TABLE IF NOT EXISTS projects (
                project_id INTEGER PRIMARY KEY,
                keyword TEXT,
                name TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- Individual mentions collected for a project.
            -- author is a JSON object: name, username, profile_pic, followers, reach.
            -- followers/reach are stored as strings by the collector.
            CREATE TABLE IF NOT EXISTS mentions (
                mention_id INTEGER PRIMARY KEY,
                project_id INTEGER,
                published TEXT NOT NULL,
                url TEXT,
                tracked_keyword TEXT,
                social_network TEXT,
                text TEXT,
                sentiment TEXT,
                language TEXT,
                country TEXT,
                author TEXT,                       -- JSON
                domain_influence REAL,             -- 0-100 authority score
                social_media_interactions INTEGER,
                linked INTEGER NOT NULL DEFAULT 0  -- boolean
            );

            -- Index for the published-descending listing and lookback windows
            CREATE INDEX IF NOT EXISTS idx_mentions_published
                ON mentions(published);

            -- Index for per-project filtering
            CREATE INDEX IF NOT EXISTS idx_mentions_project
                ON mentions(project_id);

            -- Index for the platform breakdown grouping
            CREATE INDEX IF NOT EXISTS idx_mentions_network
                ON mentions(social_network);
            ",
        )
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
/// The migration function receives the connection and should execute its SQL.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, projects, mentions = 3 tables
        assert_eq!(count, 3i64);
    }

    #[test]
    fn test_base_schema_is_recorded_as_version_one() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT version FROM schema_version ORDER BY version")
            .unwrap();
        let versions: Vec<i64> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|v| v.unwrap())
            .collect();
        assert_eq!(versions, vec![1]);
    }

    #[test]
    fn test_run_migration_applies_exactly_once() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        // A second application would fail with a duplicate-column error,
        // so running this twice proves the version guard.
        let add_column = |c: &Connection| {
            c.execute_batch("ALTER TABLE mentions ADD COLUMN collected_at TEXT;")
        };
        run_migration(&conn, 2, add_column).unwrap();
        run_migration(&conn, 2, add_column).unwrap();

        let versions: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM schema_version WHERE version = 2",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(versions, 1);
    }
}
