// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.
//
// The collector stores author followers/reach as strings; `parse_count` is
// the single defensive parse boundary for those fields. Everything past the
// data-access edge sees real integers.

use serde::{Deserialize, Serialize};

/// One row of the mentions listing, joined with its project keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionRow {
    pub mention_id: i64,
    pub published: String,
    pub url: Option<String>,
    pub tracked_keyword: Option<String>,
    pub social_network: Option<String>,
    pub text: Option<String>,
    pub sentiment: Option<String>,
    pub author_name: Option<String>,
    pub username: Option<String>,
    pub followers: i64,
    pub profile_pic: Option<String>,
    pub domain_influence: Option<f64>,
    pub social_media_interactions: Option<i64>,
    pub linked: bool,
    pub project_keyword: Option<String>,
}

/// The subset of mention fields the site aggregator folds over.
#[derive(Debug, Clone, Default)]
pub struct SiteMention {
    pub url: Option<String>,
    pub sentiment: Option<String>,
    pub domain_influence: Option<f64>,
    pub social_media_interactions: Option<i64>,
    pub author_name: Option<String>,
    pub username: Option<String>,
    pub profile_pic: Option<String>,
    pub followers: i64,
}

/// One day of mention volume for the analytics chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyVolume {
    pub day: String,
    pub mentions: i64,
    pub reach: i64,
}

/// Sentiment bucket counts over a lookback window.
///
/// `total` is the sum of the three buckets, not a row count — mentions with
/// unrecognized sentiment values fall into none of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
    pub total: i64,
}

/// Mention count per social network, for the platform breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformCount {
    pub social_network: Option<String>,
    pub count: i64,
}

/// Defensive string-to-count parse for author followers/reach.
///
/// The collector writes these as strings and isn't consistent about it
/// ("1500", "1,500", "1500 followers"). Full integers parse directly;
/// otherwise the leading digit run counts and anything else is 0.
pub fn parse_count(raw: Option<&str>) -> i64 {
    let Some(s) = raw else { return 0 };
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let lead: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    lead.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
