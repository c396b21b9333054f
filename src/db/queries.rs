// Database queries — the per-endpoint read projections.
//
// Every database interaction goes through this module. Each endpoint has
// its own SELECT shape over the shared filter from filter.rs: the mentions
// listing, the daily analytics volume, the sentiment counts, the platform
// breakdown, and the url-bearing rows that feed the site aggregator.
//
// Author subfields live in a JSON column; followers/reach go through
// models::parse_count exactly once, here at the data-access edge.

use anyhow::Result;
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, Row};

use super::filter::{MentionFilter, SqlFilter};
use super::models::{parse_count, DailyVolume, MentionRow, PlatformCount, SentimentCounts, SiteMention};

/// Read a JSON-extracted column that may come back as TEXT, INTEGER, or NULL
/// and normalize it to a defensive count.
fn count_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(n) => n,
        ValueRef::Real(f) => f as i64,
        ValueRef::Text(t) => parse_count(std::str::from_utf8(t).ok()),
        _ => 0,
    })
}

/// Mentions listing: newest first, joined with the project keyword,
/// hard-capped at 50 rows.
pub fn list_mentions(conn: &Connection, filter: &MentionFilter) -> Result<Vec<MentionRow>> {
    let sql = SqlFilter::from_filter(filter);
    let query = format!(
        "SELECT
            m.mention_id,
            m.published,
            m.url,
            m.tracked_keyword,
            m.social_network,
            m.text,
            m.sentiment,
            json_extract(m.author, '$.name'),
            json_extract(m.author, '$.username'),
            json_extract(m.author, '$.followers'),
            json_extract(m.author, '$.profile_pic'),
            m.domain_influence,
            m.social_media_interactions,
            m.linked,
            p.keyword
         FROM mentions m
         LEFT JOIN projects p ON m.project_id = p.project_id{}
         ORDER BY m.published DESC
         LIMIT 50",
        sql.where_clause()
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params_from_iter(sql.values().iter()), |row| {
        Ok(MentionRow {
            mention_id: row.get(0)?,
            published: row.get(1)?,
            url: row.get(2)?,
            tracked_keyword: row.get(3)?,
            social_network: row.get(4)?,
            text: row.get(5)?,
            sentiment: row.get(6)?,
            author_name: row.get(7)?,
            username: row.get(8)?,
            followers: count_at(row, 9)?,
            profile_pic: row.get(10)?,
            domain_influence: row.get(11)?,
            social_media_interactions: row.get(12)?,
            linked: row.get::<_, i64>(13)? != 0,
            project_keyword: row.get(14)?,
        })
    })?;

    let mut mentions = Vec::new();
    for row in rows {
        mentions.push(row?);
    }
    Ok(mentions)
}

/// Daily mention volume over the mandatory lookback window, ascending by day.
/// Reach is summed from the author JSON; non-numeric values cast to 0.
pub fn daily_volume(conn: &Connection, days: u32, filter: &MentionFilter) -> Result<Vec<DailyVolume>> {
    let mut sql = SqlFilter::from_filter(filter);
    sql.push_lookback(days);

    let query = format!(
        "SELECT
            DATE(m.published) AS day,
            COUNT(*) AS mentions,
            COALESCE(SUM(CAST(json_extract(m.author, '$.reach') AS INTEGER)), 0) AS reach
         FROM mentions m
         LEFT JOIN projects p ON m.project_id = p.project_id{}
         GROUP BY day
         ORDER BY day",
        sql.where_clause()
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params_from_iter(sql.values().iter()), |row| {
        Ok(DailyVolume {
            day: row.get(0)?,
            mentions: row.get(1)?,
            reach: row.get(2)?,
        })
    })?;

    let mut volumes = Vec::new();
    for row in rows {
        volumes.push(row?);
    }
    Ok(volumes)
}

/// Sentiment bucket counts over the lookback window.
///
/// Buckets match by exact (lowercase) value — a mention whose sentiment is
/// something else lands in no bucket, and total is the sum of the three.
pub fn sentiment_counts(conn: &Connection, days: u32) -> Result<SentimentCounts> {
    let mut sql = SqlFilter::new();
    sql.push_lookback(days);

    let query = format!(
        "SELECT
            COALESCE(SUM(CASE WHEN m.sentiment = 'positive' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN m.sentiment = 'neutral' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN m.sentiment = 'negative' THEN 1 ELSE 0 END), 0)
         FROM mentions m{}",
        sql.where_clause()
    );

    let (positive, neutral, negative): (i64, i64, i64) = conn.query_row(
        &query,
        params_from_iter(sql.values().iter()),
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    Ok(SentimentCounts {
        positive,
        neutral,
        negative,
        total: positive + neutral + negative,
    })
}

/// Mention count per social network, descending by count.
pub fn platform_counts(conn: &Connection, filter: &MentionFilter) -> Result<Vec<PlatformCount>> {
    let sql = SqlFilter::from_filter(filter);
    let query = format!(
        "SELECT m.social_network, COUNT(*) AS count
         FROM mentions m
         LEFT JOIN projects p ON m.project_id = p.project_id{}
         GROUP BY m.social_network
         ORDER BY count DESC",
        sql.where_clause()
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params_from_iter(sql.values().iter()), |row| {
        Ok(PlatformCount {
            social_network: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

/// Url-bearing mention rows for the sites endpoint, newest first.
/// The aggregator's fold order depends on this ordering.
pub fn site_mentions(
    conn: &Connection,
    project_id: Option<&str>,
    start_period: Option<&str>,
    end_period: Option<&str>,
) -> Result<Vec<SiteMention>> {
    let mut sql = SqlFilter::new();
    if let Some(id) = project_id {
        sql.push_eq("m.project_id", id.to_string().into());
    }
    if let Some(start) = start_period {
        sql.push_cmp("m.published", ">=", start.to_string().into());
    }
    if let Some(end) = end_period {
        sql.push_cmp("m.published", "<=", end.to_string().into());
    }
    sql.push_raw("m.url IS NOT NULL AND m.url != ''");

    let query = format!(
        "SELECT
            m.url,
            m.sentiment,
            m.domain_influence,
            m.social_media_interactions,
            json_extract(m.author, '$.name'),
            json_extract(m.author, '$.username'),
            json_extract(m.author, '$.profile_pic'),
            json_extract(m.author, '$.followers')
         FROM mentions m{}
         ORDER BY m.published DESC",
        sql.where_clause()
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map(params_from_iter(sql.values().iter()), |row| {
        Ok(SiteMention {
            url: row.get(0)?,
            sentiment: row.get(1)?,
            domain_influence: row.get(2)?,
            social_media_interactions: row.get(3)?,
            author_name: row.get(4)?,
            username: row.get(5)?,
            profile_pic: row.get(6)?,
            followers: count_at(row, 7)?,
        })
    })?;

    let mut mentions = Vec::new();
    for row in rows {
        mentions.push(row?);
    }
    Ok(mentions)
}

/// Total rows in the mentions table (status command).
pub fn mention_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM mentions", [], |row| row.get(0))?;
    Ok(count)
}
