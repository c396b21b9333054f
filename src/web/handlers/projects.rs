// Project endpoints — everything that crosses to an upstream service.
//
// GET  /api/projects     — list BrandMentions projects
// POST /api/projects     — validate and forward a full project setup
// GET  /api/influencers  — proxy GetProjectInfluencers
// POST /api/get_mentions — trigger a backend mention fetch
//
// Validation happens before any I/O. Upstream failures are never masked
// with fabricated data: the typed error (503 unreachable, propagated
// status otherwise) reaches the caller.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::upstream::backend::ProjectSetup;
use crate::upstream::brandmentions::PageOptions;
use crate::web::handlers::{get_param, query_pairs};
use crate::web::AppState;

/// GET /api/projects — list all monitoring projects.
pub async fn list_projects(State(state): State<AppState>) -> Response {
    if let Err(err) = state.config.require_api_key() {
        return ApiError::unavailable(err.to_string()).into_response();
    }

    match state.brandmentions.list_projects().await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub languages: Option<Vec<String>>,
    pub countries: Option<Vec<String>>,
}

/// POST /api/projects — validate and forward a project setup to the backend.
pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectRequest>,
) -> Response {
    let setup = match validate_setup(body) {
        Ok(setup) => setup,
        Err(err) => return err.into_response(),
    };

    info!(project = %setup.project_name, "forwarding project setup to backend");

    match state.backend.create_project(&setup).await {
        Ok(data) => Json(serde_json::json!({
            "success": true,
            "message": "Project created successfully",
            "data": data,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

fn validate_setup(body: CreateProjectRequest) -> Result<ProjectSetup, ApiError> {
    let project_name = body.project_name.trim().to_string();
    if project_name.is_empty() {
        return Err(ApiError::validation("Project name is required"));
    }

    if body.keywords.len() > 5 {
        return Err(ApiError::validation("Maximum 5 keywords allowed"));
    }
    let keywords: Vec<String> = body
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(ApiError::validation("At least one keyword is required"));
    }

    if body.platforms.is_empty() {
        return Err(ApiError::validation(
            "At least one platform must be selected",
        ));
    }

    Ok(ProjectSetup {
        project_name,
        keywords,
        platforms: body.platforms,
        languages: body.languages.unwrap_or_else(|| vec!["en".to_string()]),
        countries: body.countries.unwrap_or_else(|| vec!["US".to_string()]),
    })
}

/// GET /api/influencers — proxy a project's influencer listing.
pub async fn get_influencers(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    if let Err(err) = state.config.require_api_key() {
        return ApiError::unavailable(err.to_string()).into_response();
    }

    let pairs = query_pairs(raw.as_deref());
    let Some(project_id) = get_param(&pairs, "projectId").filter(|v| !v.is_empty()) else {
        return ApiError::validation("Project ID is required").into_response();
    };

    let options = PageOptions {
        page: match parse_page(&pairs, "page") {
            Ok(v) => v,
            Err(err) => return err.into_response(),
        },
        per_page: match parse_page(&pairs, "per_page") {
            Ok(v) => v,
            Err(err) => return err.into_response(),
        },
        start_period: get_param(&pairs, "startPeriod").map(str::to_string),
        end_period: get_param(&pairs, "endPeriod").map(str::to_string),
        ..Default::default()
    };

    match state
        .brandmentions
        .get_project_influencers(project_id, &options)
        .await
    {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => err.into_response(),
    }
}

fn parse_page(pairs: &[(String, String)], key: &str) -> Result<Option<u32>, ApiError> {
    match get_param(pairs, key).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{key} must be a positive integer"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct GetMentionsRequest {
    pub project_id: Option<serde_json::Value>,
}

/// POST /api/get_mentions — trigger a backend mention fetch for a project.
pub async fn get_mentions(
    State(state): State<AppState>,
    Json(body): Json<GetMentionsRequest>,
) -> Response {
    let project_id = match &body.project_id {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => return ApiError::validation("project_id is required").into_response(),
    };

    info!(project_id = %project_id, "fetching mentions via backend");

    match state.backend.get_mentions(&project_id).await {
        Ok(data) => Json(serde_json::json!({
            "success": true,
            "data": data,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, keywords: &[&str], platforms: &[&str]) -> CreateProjectRequest {
        CreateProjectRequest {
            project_name: name.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            platforms: platforms.iter().map(|s| s.to_string()).collect(),
            languages: None,
            countries: None,
        }
    }

    #[test]
    fn test_setup_requires_name() {
        let err = validate_setup(request("   ", &["acme"], &["twitter"])).unwrap_err();
        assert!(err.to_string().contains("Project name"));
    }

    #[test]
    fn test_setup_requires_nonempty_keyword() {
        assert!(validate_setup(request("p", &[], &["twitter"])).is_err());
        assert!(validate_setup(request("p", &["  ", ""], &["twitter"])).is_err());
    }

    #[test]
    fn test_setup_caps_keywords_at_five() {
        let err =
            validate_setup(request("p", &["a", "b", "c", "d", "e", "f"], &["twitter"]))
                .unwrap_err();
        assert!(err.to_string().contains("Maximum 5"));
    }

    #[test]
    fn test_setup_requires_platform() {
        assert!(validate_setup(request("p", &["acme"], &[])).is_err());
    }

    #[test]
    fn test_setup_defaults_language_and_country() {
        let setup = validate_setup(request("p", &[" acme "], &["twitter"])).unwrap();
        assert_eq!(setup.keywords, vec!["acme"]);
        assert_eq!(setup.languages, vec!["en"]);
        assert_eq!(setup.countries, vec!["US"]);
    }
}
