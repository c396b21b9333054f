// GET /api/analytics — daily mention volume over a validated lookback.
//
// Response envelope: { success, data: [{day, mentions, reach}], period,
// totalMentions, totalReach }. The days parameter must be in [1,365];
// filters ride along on the same query string. DB failure degrades to the
// deterministic mock series.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::db::filter::{parse_days, MentionFilter};
use crate::db::models::DailyVolume;
use crate::web::handlers::{get_param, query_pairs};
use crate::web::{fallback, AppState};

pub async fn get_analytics(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());

    let days = match parse_days(get_param(&pairs, "days")) {
        Ok(days) => days,
        Err(err) => return err.into_response(),
    };
    let filter = match MentionFilter::from_pairs(&pairs) {
        Ok(filter) => filter,
        Err(err) => return err.into_response(),
    };

    let data = match state.db.daily_volume(days, &filter).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "analytics degraded, serving mock data");
            fallback::mock_daily_volume()
        }
    };

    Json(envelope(days, &data)).into_response()
}

fn envelope(days: u32, data: &[DailyVolume]) -> serde_json::Value {
    let total_mentions: i64 = data.iter().map(|d| d.mentions).sum();
    let total_reach: i64 = data.iter().map(|d| d.reach).sum();
    serde_json::json!({
        "success": true,
        "data": data,
        "period": format!("{days} days"),
        "totalMentions": total_mentions,
        "totalReach": total_reach,
    })
}
