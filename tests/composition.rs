// Composition tests — the filter, gateway, and aggregation layers chained
// together the way the handlers use them, against an in-memory store.

use rusqlite::Connection;

use brandlens::db::filter::{MentionFilter, SqlFilter};
use brandlens::db::queries::{daily_volume, list_mentions, site_mentions};
use brandlens::db::schema::create_tables;
use brandlens::sites::aggregate_sites;

// ============================================================
// Filter composition property: any subset of recognized filters
// produces exactly one placeholder per bound value, contiguous from ?1.
// ============================================================

#[test]
fn any_filter_subset_binds_contiguous_placeholders() {
    let candidates: Vec<(&str, &str)> = vec![
        ("project_id", "3"),
        ("keyword", "acme"),
        ("project_created_from", "2026-01-01"),
        ("project_created_to", "2026-12-31"),
        ("mention_id", "42"),
        ("published_from", "2026-08-01"),
        ("published_to", "2026-08-31"),
        ("language", "en"),
        ("country", "US"),
        ("tracked_keyword", "widget"),
        ("domain_influence_min", "10"),
        ("domain_influence_max", "90"),
        ("social_media_interactions_min", "5"),
        ("social_media_interactions_max", "500"),
        ("linked", "true"),
    ];

    // All subsets is 2^15; a striding sample keeps the test fast while
    // still crossing every filter with every other one.
    for mask in (0u32..(1 << candidates.len())).step_by(127) {
        let pairs: Vec<(String, String)> = candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, (k, v))| (k.to_string(), v.to_string()))
            .collect();

        let filter = MentionFilter::from_pairs(&pairs).unwrap();
        let sql = SqlFilter::from_filter(&filter);
        let clause = sql.where_clause();

        assert_eq!(
            sql.values().len(),
            pairs.len(),
            "one bound value per provided filter for mask {mask}"
        );
        for n in 1..=sql.values().len() {
            assert!(clause.contains(&format!("?{n}")), "missing ?{n} in {clause}");
        }
        assert!(!clause.contains(&format!("?{}", sql.values().len() + 1)));
    }
}

#[test]
fn repeatable_filters_add_one_placeholder_per_value() {
    let pairs: Vec<(String, String)> = vec![
        ("sentiment".into(), "positive".into()),
        ("sentiment".into(), "neutral".into()),
        ("sentiment".into(), "negative".into()),
        ("social_network".into(), "twitter".into()),
        ("social_network".into(), "reddit".into()),
        ("language".into(), "en".into()),
    ];
    let filter = MentionFilter::from_pairs(&pairs).unwrap();
    let sql = SqlFilter::from_filter(&filter);
    assert_eq!(sql.values().len(), 6);
}

// ============================================================
// Gateway -> aggregator chain
// ============================================================

fn seeded() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();

    let rows: Vec<(i64, &str, &str, &str, Option<f64>, Option<i64>, &str)> = vec![
        // blog.foo.com twice: influence 100.0 pins the ratchet at 10
        (1, "2026-08-02 10:00:00", "https://blog.foo.com/x", "very positive", Some(100.0), None, r#"{"name":"Ann","username":"ann","followers":"100","reach":"1000"}"#),
        (2, "2026-08-02 09:00:00", "https://blog.foo.com/y", "negative", None, Some(300), r#"{"name":"Bob","username":"bob","followers":"50","reach":"500"}"#),
        // www-prefixed and bare variants of the same domain
        (3, "2026-08-02 08:00:00", "http://www.example.com/a", "neutral", Some(30.0), None, r#"{"name":"Cat","username":"cat"}"#),
        (4, "2026-08-02 07:00:00", "https://example.com/b", "mixed", None, None, r#"{"name":"Dan","username":"dan"}"#),
        // unparseable URL: counted nowhere
        (5, "2026-08-02 06:00:00", "not-a-url", "positive", None, None, r#"{"name":"Eve","username":"eve"}"#),
    ];
    for (id, published, url, sentiment, influence, interactions, author) in rows {
        conn.execute(
            "INSERT INTO mentions (mention_id, project_id, published, url, social_network,
                                   sentiment, author, domain_influence, social_media_interactions)
             VALUES (?1, 1, ?2, ?3, 'twitter', ?4, ?5, ?6, ?7)",
            rusqlite::params![id, published, url, sentiment, author, influence, interactions],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO projects (project_id, keyword, name) VALUES (1, 'acme', 'Acme')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn site_pipeline_groups_normalizes_and_ratchets() {
    let conn = seeded();
    let rows = site_mentions(&conn, None, None, None).unwrap();
    // "not-a-url" survives the SQL layer (it's non-empty) and is skipped
    // by the aggregator's URL parse instead
    assert_eq!(rows.len(), 5);

    let sites = aggregate_sites(&rows);
    assert_eq!(sites.len(), 2);

    let foo = sites.iter().find(|s| s.domain == "blog.foo.com").unwrap();
    assert_eq!(foo.mention_count, 2);
    assert!((foo.performance_score - 10.0).abs() < f64::EPSILON);
    assert_eq!(foo.estimated_visits, 200_000);
    assert_eq!(foo.sentiment.positive, 1);
    assert_eq!(foo.sentiment.negative, 1);

    let example = sites.iter().find(|s| s.domain == "example.com").unwrap();
    assert_eq!(example.mention_count, 2);
    // "mixed" classifies as neutral
    assert_eq!(example.sentiment.neutral, 2);

    for site in &sites {
        let tally = site.sentiment;
        assert_eq!(
            tally.positive + tally.neutral + tally.negative,
            site.mention_count
        );
    }
}

#[test]
fn filtered_listing_feeds_from_the_same_builder() {
    let conn = seeded();

    let filter = MentionFilter::from_pairs(&[("sentiment".to_string(), "negative".to_string())])
        .unwrap();
    let rows = list_mentions(&conn, &filter).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username.as_deref(), Some("bob"));
    assert_eq!(rows[0].followers, 50);
    assert_eq!(rows[0].project_keyword.as_deref(), Some("acme"));
}

#[test]
fn daily_volume_rejects_nothing_inside_window_sums_reach() {
    let conn = Connection::open_in_memory().unwrap();
    create_tables(&conn).unwrap();
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    for (id, reach) in [(1, "1000"), (2, "500"), (3, "oops")] {
        conn.execute(
            "INSERT INTO mentions (mention_id, project_id, published, author)
             VALUES (?1, 1, ?2, ?3)",
            rusqlite::params![
                id,
                format!("{today} 10:0{id}:00"),
                format!(r#"{{"name":"A","username":"a","reach":"{reach}"}}"#)
            ],
        )
        .unwrap();
    }

    let rows = daily_volume(&conn, 30, &MentionFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mentions, 3);
    assert_eq!(rows[0].reach, 1500);
}
