// Dynamic query filter construction.
//
// Every read endpoint shares one filter contract: a flat set of optional
// query-string parameters is parsed into a MentionFilter, and SqlFilter
// turns that into a WHERE clause with positional ?N placeholders plus a
// matching bound-value list. User input is always bound, never spliced
// into SQL text.
//
// Parse errors (non-numeric range bounds, bad booleans, out-of-range days)
// are client errors — they surface as 400 before any I/O happens.

use rusqlite::types::Value;

use crate::error::ApiError;

/// Parsed filter parameters recognized by the mention read endpoints.
///
/// Absent or empty-valued keys contribute nothing. `sentiments` and
/// `social_networks` come from repeatable query keys and keep their
/// given order.
#[derive(Debug, Default, Clone)]
pub struct MentionFilter {
    pub project_id: Option<String>,
    pub keyword: Option<String>,
    pub project_created_from: Option<String>,
    pub project_created_to: Option<String>,
    pub mention_id: Option<String>,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub sentiments: Vec<String>,
    pub social_networks: Vec<String>,
    pub tracked_keyword: Option<String>,
    pub domain_influence_min: Option<f64>,
    pub domain_influence_max: Option<f64>,
    pub social_media_interactions_min: Option<i64>,
    pub social_media_interactions_max: Option<i64>,
    pub linked: Option<bool>,
}

impl MentionFilter {
    /// Parse a filter from decoded query-string pairs.
    ///
    /// Unrecognized keys are ignored (endpoints layer their own parameters,
    /// e.g. `days`, on the same query string). Empty values are treated as
    /// absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, ApiError> {
        let mut filter = MentionFilter::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "project_id" => filter.project_id = Some(value.clone()),
                "keyword" => filter.keyword = Some(value.clone()),
                "project_created_from" => filter.project_created_from = Some(value.clone()),
                "project_created_to" => filter.project_created_to = Some(value.clone()),
                "mention_id" => filter.mention_id = Some(value.clone()),
                "published_from" => filter.published_from = Some(value.clone()),
                "published_to" => filter.published_to = Some(value.clone()),
                "language" => filter.language = Some(value.clone()),
                "country" => filter.country = Some(value.clone()),
                "sentiment" => filter.sentiments.push(value.clone()),
                "social_network" => filter.social_networks.push(value.clone()),
                "tracked_keyword" => filter.tracked_keyword = Some(value.clone()),
                "domain_influence_min" => {
                    filter.domain_influence_min = Some(parse_float(key, value)?)
                }
                "domain_influence_max" => {
                    filter.domain_influence_max = Some(parse_float(key, value)?)
                }
                "social_media_interactions_min" => {
                    filter.social_media_interactions_min = Some(parse_int(key, value)?)
                }
                "social_media_interactions_max" => {
                    filter.social_media_interactions_max = Some(parse_int(key, value)?)
                }
                "linked" => filter.linked = Some(parse_bool(key, value)?),
                _ => {}
            }
        }

        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.keyword.is_none()
            && self.project_created_from.is_none()
            && self.project_created_to.is_none()
            && self.mention_id.is_none()
            && self.published_from.is_none()
            && self.published_to.is_none()
            && self.language.is_none()
            && self.country.is_none()
            && self.sentiments.is_empty()
            && self.social_networks.is_empty()
            && self.tracked_keyword.is_none()
            && self.domain_influence_min.is_none()
            && self.domain_influence_max.is_none()
            && self.social_media_interactions_min.is_none()
            && self.social_media_interactions_max.is_none()
            && self.linked.is_none()
    }
}

fn parse_float(key: &str, value: &str) -> Result<f64, ApiError> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| ApiError::validation(format!("{key} must be a number, got '{value}'")))?;
    if !parsed.is_finite() {
        return Err(ApiError::validation(format!(
            "{key} must be a finite number, got '{value}'"
        )));
    }
    Ok(parsed)
}

fn parse_int(key: &str, value: &str) -> Result<i64, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::validation(format!("{key} must be an integer, got '{value}'")))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ApiError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ApiError::validation(format!(
            "{key} must be true or false, got '{value}'"
        ))),
    }
}

/// Validate the `days` lookback parameter for the analytics and sentiment
/// endpoints. Absent defaults to 7; anything non-numeric or outside [1,365]
/// is a client error.
pub fn parse_days(raw: Option<&str>) -> Result<u32, ApiError> {
    let raw = match raw {
        None | Some("") => return Ok(7),
        Some(r) => r,
    };
    match raw.parse::<u32>() {
        Ok(days) if (1..=365).contains(&days) => Ok(days),
        _ => Err(ApiError::validation(
            "Invalid days parameter. Must be a number between 1 and 365.",
        )),
    }
}

/// Assembled WHERE clause plus its bound values.
///
/// Conditions are ANDed in append order; each bound value gets the next
/// contiguous ?N placeholder so one value list serves the whole statement.
#[derive(Debug, Default)]
pub struct SqlFilter {
    conditions: Vec<String>,
    values: Vec<Value>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the shared filter conditions for the mentions/projects join.
    /// `m` is the mentions alias, `p` the projects alias.
    pub fn from_filter(filter: &MentionFilter) -> Self {
        let mut sql = SqlFilter::new();

        if let Some(v) = &filter.project_id {
            sql.push_eq("m.project_id", Value::from(v.clone()));
        }
        if let Some(v) = &filter.keyword {
            sql.push_like("p.keyword", v);
        }
        if let Some(v) = &filter.project_created_from {
            sql.push_cmp("p.created_at", ">=", Value::from(v.clone()));
        }
        if let Some(v) = &filter.project_created_to {
            sql.push_cmp("p.created_at", "<=", Value::from(v.clone()));
        }
        if let Some(v) = &filter.mention_id {
            sql.push_eq("m.mention_id", Value::from(v.clone()));
        }
        if let Some(v) = &filter.published_from {
            sql.push_cmp("m.published", ">=", Value::from(v.clone()));
        }
        if let Some(v) = &filter.published_to {
            sql.push_cmp("m.published", "<=", Value::from(v.clone()));
        }
        if let Some(v) = &filter.language {
            sql.push_eq("m.language", Value::from(v.clone()));
        }
        if let Some(v) = &filter.country {
            sql.push_eq("m.country", Value::from(v.clone()));
        }
        sql.push_in("m.sentiment", &filter.sentiments);
        sql.push_in("m.social_network", &filter.social_networks);
        if let Some(v) = &filter.tracked_keyword {
            sql.push_like("m.tracked_keyword", v);
        }
        if let Some(v) = filter.domain_influence_min {
            sql.push_cmp("m.domain_influence", ">=", Value::from(v));
        }
        if let Some(v) = filter.domain_influence_max {
            sql.push_cmp("m.domain_influence", "<=", Value::from(v));
        }
        if let Some(v) = filter.social_media_interactions_min {
            sql.push_cmp("m.social_media_interactions", ">=", Value::from(v));
        }
        if let Some(v) = filter.social_media_interactions_max {
            sql.push_cmp("m.social_media_interactions", "<=", Value::from(v));
        }
        if let Some(v) = filter.linked {
            sql.push_eq("m.linked", Value::from(v));
        }

        sql
    }

    /// Bind a value, returning its 1-based placeholder index.
    fn bind(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub fn push_eq(&mut self, column: &str, value: Value) {
        let n = self.bind(value);
        self.conditions.push(format!("{column} = ?{n}"));
    }

    pub fn push_cmp(&mut self, column: &str, op: &str, value: Value) {
        let n = self.bind(value);
        self.conditions.push(format!("{column} {op} ?{n}"));
    }

    /// Case-insensitive substring match. The value is wrapped in %..% here
    /// so callers pass the raw filter text.
    pub fn push_like(&mut self, column: &str, value: &str) {
        let n = self.bind(Value::from(format!("%{value}%")));
        self.conditions
            .push(format!("lower({column}) LIKE lower(?{n})"));
    }

    /// IN-list with one placeholder per value, preserving the given order.
    /// Zero values contribute nothing.
    pub fn push_in(&mut self, column: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        let mut placeholders = Vec::with_capacity(values.len());
        for v in values {
            let n = self.bind(Value::from(v.clone()));
            placeholders.push(format!("?{n}"));
        }
        self.conditions
            .push(format!("{column} IN ({})", placeholders.join(", ")));
    }

    /// Append a condition with no bound values (e.g. a NOT NULL guard).
    pub fn push_raw(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    /// Mandatory lookback window: published within the last `days` days.
    pub fn push_lookback(&mut self, days: u32) {
        let n = self.bind(Value::from(format!("-{days} days")));
        self.conditions
            .push(format!("m.published >= datetime('now', ?{n})"));
    }

    /// The assembled clause, starting with " WHERE " — or an empty string
    /// when no conditions were appended.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}
