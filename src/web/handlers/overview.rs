// GET /api/overview — one round trip for the dashboard landing page.
//
// Fetches the volume series, sentiment counts, and platform breakdown
// concurrently and returns all three sections. Each section degrades to
// its mock independently, same as the standalone endpoints.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::db::filter::{parse_days, MentionFilter};
use crate::web::handlers::{get_param, query_pairs};
use crate::web::{fallback, AppState};

pub async fn get_overview(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());

    let days = match parse_days(get_param(&pairs, "days")) {
        Ok(days) => days,
        Err(err) => return err.into_response(),
    };
    let filter = match MentionFilter::from_pairs(&pairs) {
        Ok(filter) => filter,
        Err(err) => return err.into_response(),
    };

    let (volume, sentiment, platforms) = tokio::join!(
        state.db.daily_volume(days, &filter),
        state.db.sentiment_counts(days),
        state.db.platform_counts(&filter),
    );

    let volume = volume.unwrap_or_else(|err| {
        warn!(error = %err, "overview analytics degraded");
        fallback::mock_daily_volume()
    });
    let sentiment = sentiment.unwrap_or_else(|err| {
        warn!(error = %err, "overview sentiment degraded");
        fallback::mock_sentiment()
    });
    let platforms = platforms.unwrap_or_else(|err| {
        warn!(error = %err, "overview platforms degraded");
        fallback::mock_platforms()
    });

    let total_mentions: i64 = volume.iter().map(|d| d.mentions).sum();
    let total_reach: i64 = volume.iter().map(|d| d.reach).sum();

    Json(serde_json::json!({
        "success": true,
        "period": format!("{days} days"),
        "analytics": {
            "data": volume,
            "totalMentions": total_mentions,
            "totalReach": total_reach,
        },
        "sentiment": sentiment,
        "platforms": platforms,
    }))
    .into_response()
}
