// GET /api/mentions — filtered mention listing, newest first, max 50 rows.
//
// Bad filter values are a 400 before any query runs. A failing database
// degrades to the mock listing so the dashboard keeps rendering.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::db::filter::MentionFilter;
use crate::web::handlers::query_pairs;
use crate::web::{fallback, AppState};

pub async fn list_mentions(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());
    let filter = match MentionFilter::from_pairs(&pairs) {
        Ok(filter) => filter,
        Err(err) => return err.into_response(),
    };

    match state.db.list_mentions(&filter).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            warn!(error = %err, "mention listing degraded, serving mock data");
            Json(fallback::mock_mentions()).into_response()
        }
    }
}
