// Deterministic mock payloads for the local read endpoints.
//
// When the mention store is unreachable, the dashboard's read endpoints
// serve these instead of a 5xx — availability over correctness for a
// UI-facing path. The shapes match the real responses field for field;
// the values are fixed so tests (and anyone eyeballing the dashboard)
// can tell fabricated data apart from real data.

use chrono::{Duration, Utc};

use crate::db::models::{DailyVolume, MentionRow, PlatformCount, SentimentCounts};

/// Three recognizable sample mentions, newest first.
pub fn mock_mentions() -> Vec<MentionRow> {
    let now = Utc::now();
    let stamp = |hours_ago: i64| {
        (now - Duration::hours(hours_ago))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    };

    vec![
        MentionRow {
            mention_id: 1,
            published: stamp(0),
            url: Some("https://twitter.com/user1/status/123".into()),
            tracked_keyword: Some("brand".into()),
            social_network: Some("twitter".into()),
            text: Some("Great experience with this brand! Highly recommend.".into()),
            sentiment: Some("positive".into()),
            author_name: Some("John Doe".into()),
            username: Some("johndoe".into()),
            followers: 1500,
            profile_pic: None,
            domain_influence: None,
            social_media_interactions: None,
            linked: false,
            project_keyword: None,
        },
        MentionRow {
            mention_id: 2,
            published: stamp(1),
            url: Some("https://instagram.com/p/abc123".into()),
            tracked_keyword: Some("product".into()),
            social_network: Some("instagram".into()),
            text: Some("The product quality could be better.".into()),
            sentiment: Some("negative".into()),
            author_name: Some("Jane Smith".into()),
            username: Some("janesmith".into()),
            followers: 2300,
            profile_pic: None,
            domain_influence: None,
            social_media_interactions: None,
            linked: false,
            project_keyword: None,
        },
        MentionRow {
            mention_id: 3,
            published: stamp(2),
            url: Some("https://facebook.com/post/xyz789".into()),
            tracked_keyword: Some("service".into()),
            social_network: Some("facebook".into()),
            text: Some("Average service, nothing special.".into()),
            sentiment: Some("neutral".into()),
            author_name: Some("Mike Johnson".into()),
            username: Some("mikej".into()),
            followers: 890,
            profile_pic: None,
            domain_influence: None,
            social_media_interactions: None,
            linked: false,
            project_keyword: None,
        },
    ]
}

/// A seven-day volume series ending today. Values follow a fixed pattern
/// so each day differs but reruns produce the same numbers.
pub fn mock_daily_volume() -> Vec<DailyVolume> {
    let today = Utc::now().date_naive();
    (0..7)
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            DailyVolume {
                day: day.format("%Y-%m-%d").to_string(),
                mentions: 10 + (6 - offset) * 5,
                reach: 1000 + (6 - offset) * 1500,
            }
        })
        .collect()
}

pub fn mock_sentiment() -> SentimentCounts {
    SentimentCounts {
        positive: 45,
        neutral: 30,
        negative: 25,
        total: 100,
    }
}

pub fn mock_platforms() -> Vec<PlatformCount> {
    [
        ("twitter", 45),
        ("instagram", 32),
        ("facebook", 23),
        ("linkedin", 15),
        ("youtube", 8),
    ]
    .into_iter()
    .map(|(network, count)| PlatformCount {
        social_network: Some(network.to_string()),
        count,
    })
    .collect()
}
