// GET /api/sites — per-domain aggregation of url-bearing mentions.
//
// Query: projectId, startPeriod, endPeriod (all optional). Response:
// { sites: [...], total }. Unlike the chart endpoints there is no mock
// fallback here — fabricated domains would be actively misleading, so a
// broken store surfaces as 503.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::error::ApiError;
use crate::sites::aggregate_sites;
use crate::web::handlers::{get_param, query_pairs};
use crate::web::AppState;

pub async fn get_sites(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let pairs = query_pairs(raw.as_deref());
    let project_id = get_param(&pairs, "projectId").filter(|v| !v.is_empty());
    let start_period = get_param(&pairs, "startPeriod").filter(|v| !v.is_empty());
    let end_period = get_param(&pairs, "endPeriod").filter(|v| !v.is_empty());

    let mentions = match state
        .db
        .site_mentions(project_id, start_period, end_period)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, "failed to fetch site mentions");
            return ApiError::unavailable("Failed to fetch sites").into_response();
        }
    };

    let reports: Vec<_> = aggregate_sites(&mentions)
        .iter()
        .map(|site| site.to_report())
        .collect();

    Json(serde_json::json!({
        "total": reports.len(),
        "sites": reports,
    }))
    .into_response()
}
