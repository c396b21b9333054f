// Web server — Axum-based dashboard API.
//
// All routes serve JSON. The four local read endpoints (mentions,
// analytics, sentiment, platforms) degrade to deterministic mock data when
// the database fails — the dashboard stays up through a broken store. The
// sites endpoint and everything that proxies an upstream service surface
// typed errors instead.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::upstream::{BackendClient, BrandMentionsClient};

pub mod fallback;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    pub brandmentions: Arc<BrandMentionsClient>,
    pub backend: Arc<BackendClient>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn Database>) -> Result<Self> {
        let brandmentions = BrandMentionsClient::new(
            &config.brandmentions_api_url,
            &config.brandmentions_api_key,
        )?;
        let backend = BackendClient::new(&config.backend_url)?;
        Ok(Self {
            db,
            config: Arc::new(config),
            brandmentions: Arc::new(brandmentions),
            backend: Arc::new(backend),
        })
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, db: Arc<dyn Database>, port: u16, bind: &str) -> Result<()> {
    let state = AppState::new(config, db)?;
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Brandlens dashboard API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/mentions", get(handlers::mentions::list_mentions))
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        .route("/api/sentiment", get(handlers::sentiment::get_sentiment))
        .route("/api/platforms", get(handlers::platforms::get_platforms))
        .route("/api/sites", get(handlers::sites::get_sites))
        .route("/api/overview", get(handlers::overview::get_overview))
        .route(
            "/api/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/api/influencers",
            get(handlers::projects::get_influencers),
        )
        .route("/api/get_mentions", post(handlers::projects::get_mentions))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deploy health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}
