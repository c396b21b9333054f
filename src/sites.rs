// Site aggregation — fold mention rows into per-domain statistics.
//
// Mentions are grouped by the normalized domain of their URL. Each domain
// accumulates a mention count, a sentiment tally, a deduplicated author
// list, and a performance score that only ever ratchets upward as more
// mentions fold in. Estimated visits are recomputed from the current count
// and performance after every step, so the final value depends only on the
// full mention set.
//
// A mention whose URL fails to parse is skipped — it contributes to no
// site and never aborts the batch.

use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::db::models::SiteMention;

/// Per-site sentiment bucket counts. Every counted mention lands in
/// exactly one bucket, so the three always sum to the mention count.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

/// An author associated with a site, first-seen order, deduped by username.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SiteAuthor {
    pub name: String,
    pub username: Option<String>,
    pub profile_pic: Option<String>,
    pub followers: i64,
}

/// Aggregated statistics for one source domain. Raw numerics — see
/// `SiteReport` for the display form.
#[derive(Debug, Clone, Serialize)]
pub struct SiteStats {
    pub domain: String,
    pub mention_count: u64,
    /// Running maximum of per-mention performance, in [1, 10].
    pub performance_score: f64,
    pub estimated_visits: i64,
    pub sentiment: SentimentTally,
    pub authors: Vec<SiteAuthor>,
}

/// Display form of a site record, matching the dashboard JSON contract.
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub site: String,
    pub mentions: u64,
    pub visits: String,
    pub performance: String,
    pub sentiment: SentimentTally,
    pub authors: Vec<SiteAuthor>,
}

impl SiteStats {
    fn new(domain: String) -> Self {
        Self {
            domain,
            mention_count: 0,
            performance_score: 0.0,
            estimated_visits: 0,
            sentiment: SentimentTally::default(),
            authors: Vec::new(),
        }
    }

    pub fn to_report(&self) -> SiteReport {
        SiteReport {
            site: self.domain.clone(),
            mentions: self.mention_count,
            visits: group_thousands(self.estimated_visits),
            performance: format!("{}/10", self.performance_score.round() as i64),
            sentiment: self.sentiment,
            authors: self.authors.clone(),
        }
    }
}

/// Fold mentions (in caller-provided order) into per-domain site stats,
/// sorted descending by mention count. The sort is stable, so domains with
/// equal counts keep their first-seen relative order.
pub fn aggregate_sites(mentions: &[SiteMention]) -> Vec<SiteStats> {
    let mut sites: Vec<SiteStats> = Vec::new();
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for mention in mentions {
        let Some(raw_url) = mention.url.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        let Some(domain) = domain_of(raw_url) else {
            warn!(url = raw_url, "skipping mention with unparseable URL");
            continue;
        };

        let slot = *index.entry(domain.clone()).or_insert_with(|| {
            sites.push(SiteStats::new(domain));
            sites.len() - 1
        });
        let site = &mut sites[slot];

        site.mention_count += 1;

        // Author dedup by exact username; only named authors are listed
        let already_listed = site.authors.iter().any(|a| a.username == mention.username);
        if !already_listed {
            if let Some(name) = mention.author_name.as_deref().filter(|n| !n.is_empty()) {
                site.authors.push(SiteAuthor {
                    name: name.to_string(),
                    username: mention.username.clone(),
                    profile_pic: mention.profile_pic.clone(),
                    followers: mention.followers,
                });
            }
        }

        // Performance ratchet: the site keeps the best single-mention score
        let score = mention_performance(
            mention.domain_influence,
            mention.social_media_interactions,
        );
        site.performance_score = site.performance_score.max(score);

        // Visits derive fresh from the current count and performance
        site.estimated_visits =
            (site.mention_count as f64 * 100_000.0 * (site.performance_score / 10.0)).floor()
                as i64;

        match classify_sentiment(mention.sentiment.as_deref()) {
            Sentiment::Positive => site.sentiment.positive += 1,
            Sentiment::Negative => site.sentiment.negative += 1,
            Sentiment::Neutral => site.sentiment.neutral += 1,
        }
    }

    sites.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));
    sites
}

/// Hostname with a single leading "www." stripped. None for anything the
/// URL parser rejects or that has no host.
pub fn domain_of(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Score one mention's contribution to its site, in [1, 10].
///
/// Domain influence (0-100) maps to a 1-10 base, defaulting to 5 when
/// absent. Social interactions add up to 5 more points (100 interactions
/// per point), re-clamped to the 1-10 range.
pub fn mention_performance(domain_influence: Option<f64>, interactions: Option<i64>) -> f64 {
    let mut score = 5.0;
    if let Some(influence) = domain_influence {
        score = (influence / 10.0).clamp(1.0, 10.0);
    }
    if let Some(interactions) = interactions {
        let boost = (interactions as f64 / 100.0).clamp(0.0, 5.0);
        score = (score + boost).clamp(1.0, 10.0);
    }
    score
}

enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Tolerant substring classification: "very positive" counts as positive,
/// anything not containing positive/negative (including empty) is neutral.
fn classify_sentiment(raw: Option<&str>) -> Sentiment {
    let Some(s) = raw else {
        return Sentiment::Neutral;
    };
    let s = s.to_lowercase();
    if s.contains("positive") {
        Sentiment::Positive
    } else if s.contains("negative") {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Thousands-grouped display form ("200000" -> "200,000").
pub fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(url: &str) -> SiteMention {
        SiteMention {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_domain_strips_one_leading_www() {
        assert_eq!(
            domain_of("http://www.example.com/a").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            domain_of("https://example.com/b").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            domain_of("https://www.www.foo.com/x").as_deref(),
            Some("www.foo.com")
        );
        assert_eq!(domain_of("not-a-url"), None);
    }

    #[test]
    fn test_www_and_bare_urls_share_a_site() {
        let mentions = vec![
            mention("http://www.example.com/a"),
            mention("https://example.com/b"),
        ];
        let sites = aggregate_sites(&mentions);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].domain, "example.com");
        assert_eq!(sites[0].mention_count, 2);
    }

    #[test]
    fn test_unparseable_url_is_skipped() {
        let mentions = vec![mention("not-a-url"), mention("https://ok.com/x")];
        let sites = aggregate_sites(&mentions);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].domain, "ok.com");
    }

    #[test]
    fn test_empty_input_yields_no_sites() {
        assert!(aggregate_sites(&[]).is_empty());
    }

    #[test]
    fn test_performance_ratchet_keeps_maximum() {
        let mentions = vec![
            SiteMention {
                url: Some("https://site.com/a".into()),
                domain_influence: Some(80.0),
                ..Default::default()
            },
            SiteMention {
                url: Some("https://site.com/b".into()),
                domain_influence: Some(10.0),
                ..Default::default()
            },
        ];
        let sites = aggregate_sites(&mentions);
        // max(clamp(80/10), clamp(10/10)) = max(8, 1) = 8, not the last-seen 1
        assert!((sites[0].performance_score - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentiment_tally_sums_to_mention_count() {
        let mentions = vec![
            SiteMention {
                url: Some("https://site.com/1".into()),
                sentiment: Some("very positive".into()),
                ..Default::default()
            },
            SiteMention {
                url: Some("https://site.com/2".into()),
                sentiment: Some("mixed".into()),
                ..Default::default()
            },
            SiteMention {
                url: Some("https://site.com/3".into()),
                sentiment: None,
                ..Default::default()
            },
            SiteMention {
                url: Some("https://site.com/4".into()),
                sentiment: Some("Negative".into()),
                ..Default::default()
            },
        ];
        let sites = aggregate_sites(&mentions);
        let s = &sites[0];
        assert_eq!(s.sentiment.positive, 1);
        assert_eq!(s.sentiment.neutral, 2);
        assert_eq!(s.sentiment.negative, 1);
        assert_eq!(
            s.sentiment.positive + s.sentiment.neutral + s.sentiment.negative,
            s.mention_count
        );
    }

    #[test]
    fn test_worked_example_blog_foo_com() {
        let mentions = vec![
            SiteMention {
                url: Some("https://blog.foo.com/x".into()),
                domain_influence: Some(50.0),
                sentiment: Some("very positive".into()),
                ..Default::default()
            },
            SiteMention {
                url: Some("https://blog.foo.com/y".into()),
                social_media_interactions: Some(300),
                sentiment: Some("negative".into()),
                ..Default::default()
            },
        ];
        let sites = aggregate_sites(&mentions);
        assert_eq!(sites.len(), 1);
        let s = &sites[0];
        assert_eq!(s.domain, "blog.foo.com");
        assert_eq!(s.mention_count, 2);
        assert_eq!(
            s.sentiment,
            SentimentTally {
                positive: 1,
                neutral: 0,
                negative: 1
            }
        );
        // max(clamp(50/10)=5, clamp(5 + clamp(300/100, 0, 5))=8) = 8
        assert!((s.performance_score - 8.0).abs() < f64::EPSILON);
        // floor(2 * 100000 * (8/10)) = 160000
        assert_eq!(s.estimated_visits, 160_000);

        let report = s.to_report();
        assert_eq!(report.performance, "8/10");
        assert_eq!(report.visits, "160,000");
    }

    #[test]
    fn test_authors_dedupe_by_username_in_first_seen_order() {
        let mentions = vec![
            SiteMention {
                url: Some("https://s.com/1".into()),
                author_name: Some("Alice".into()),
                username: Some("alice".into()),
                followers: 10,
                ..Default::default()
            },
            SiteMention {
                url: Some("https://s.com/2".into()),
                author_name: Some("Bob".into()),
                username: Some("bob".into()),
                ..Default::default()
            },
            SiteMention {
                url: Some("https://s.com/3".into()),
                author_name: Some("Alice Again".into()),
                username: Some("alice".into()),
                ..Default::default()
            },
            // No author name: counted as a mention but never listed
            SiteMention {
                url: Some("https://s.com/4".into()),
                username: Some("ghost".into()),
                ..Default::default()
            },
        ];
        let sites = aggregate_sites(&mentions);
        let authors = &sites[0].authors;
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].name, "Alice");
        assert_eq!(authors[1].name, "Bob");
        assert_eq!(sites[0].mention_count, 4);
    }

    #[test]
    fn test_sites_sorted_by_mentions_stable_for_ties() {
        let mentions = vec![
            mention("https://first.com/1"),
            mention("https://second.com/1"),
            mention("https://third.com/1"),
            mention("https://third.com/2"),
        ];
        let sites = aggregate_sites(&mentions);
        assert_eq!(sites[0].domain, "third.com");
        // Tied domains keep first-seen order
        assert_eq!(sites[1].domain, "first.com");
        assert_eq!(sites[2].domain, "second.com");
    }

    #[test]
    fn test_mention_performance_defaults_and_clamps() {
        assert!((mention_performance(None, None) - 5.0).abs() < f64::EPSILON);
        assert!((mention_performance(Some(200.0), None) - 10.0).abs() < f64::EPSILON);
        assert!((mention_performance(Some(5.0), None) - 1.0).abs() < f64::EPSILON);
        // Boost caps at 5 and the sum re-clamps to 10
        assert!((mention_performance(Some(90.0), Some(10_000)) - 10.0).abs() < f64::EPSILON);
        assert!((mention_performance(None, Some(50)) - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(200_000), "200,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-4500), "-4,500");
    }
}
