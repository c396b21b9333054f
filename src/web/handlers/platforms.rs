// GET /api/platforms — mention counts per social network, descending.
//
// Returns a bare array of {social_network, count}. DB failure degrades to
// the fixed mock breakdown.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::db::filter::MentionFilter;
use crate::web::handlers::query_pairs;
use crate::web::{fallback, AppState};

pub async fn get_platforms(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());
    let filter = match MentionFilter::from_pairs(&pairs) {
        Ok(filter) => filter,
        Err(err) => return err.into_response(),
    };

    match state.db.platform_counts(&filter).await {
        Ok(counts) => Json(counts).into_response(),
        Err(err) => {
            warn!(error = %err, "platform breakdown degraded, serving mock data");
            Json(fallback::mock_platforms()).into_response()
        }
    }
}
