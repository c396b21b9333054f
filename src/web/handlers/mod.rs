// Endpoint handlers.
//
// Filters arrive as flat query strings with repeatable keys (sentiment,
// social_network), which axum's serde Query extractor can't represent —
// so handlers take RawQuery and decode the pairs themselves.

pub mod analytics;
pub mod mentions;
pub mod overview;
pub mod platforms;
pub mod projects;
pub mod sentiment;
pub mod sites;

/// Decode a raw query string into ordered key/value pairs.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

/// First value for a key, if present.
pub fn get_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
