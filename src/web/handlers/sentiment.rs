// GET /api/sentiment — sentiment bucket counts over a validated lookback.
//
// Response: { success, data: {positive, neutral, negative, total}, period }.
// Total is the sum of the three buckets. DB failure degrades to fixed mock
// counts with the same invariant.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::db::filter::parse_days;
use crate::web::handlers::{get_param, query_pairs};
use crate::web::{fallback, AppState};

pub async fn get_sentiment(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());

    let days = match parse_days(get_param(&pairs, "days")) {
        Ok(days) => days,
        Err(err) => return err.into_response(),
    };

    let counts = match state.db.sentiment_counts(days).await {
        Ok(counts) => counts,
        Err(err) => {
            warn!(error = %err, "sentiment degraded, serving mock data");
            fallback::mock_sentiment()
        }
    };

    Json(serde_json::json!({
        "success": true,
        "data": counts,
        "period": format!("{days} days"),
    }))
    .into_response()
}
