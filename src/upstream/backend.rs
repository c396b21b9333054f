// Project-ingest backend client.
//
// The backend owns project setup (creating the BrandMentions project and
// seeding the local store) and bulk mention fetches. A connection failure
// becomes Unavailable with a message that tells the operator which service
// to start; a non-2xx response propagates the backend's own status.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;

/// Payload for the backend's full project setup.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSetup {
    pub project_name: String,
    pub keywords: Vec<String>,
    pub platforms: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
}

pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("brandlens/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, "backend request");

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiError::unavailable(format!(
                    "Unable to connect to backend server. Please ensure it is running on {}",
                    self.base_url
                ))
            } else {
                ApiError::unavailable(format!("Backend request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: format!("Backend error: {} - {}", status.as_u16(), message),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::unavailable(format!("Failed to parse backend response: {e}")))
    }

    /// Create a project end to end (upstream project + local seeding).
    pub async fn create_project(&self, setup: &ProjectSetup) -> Result<serde_json::Value, ApiError> {
        self.post_json("/projects/full_setup", setup).await
    }

    /// Trigger a mention fetch for a project and return the result envelope.
    pub async fn get_mentions(&self, project_id: &str) -> Result<serde_json::Value, ApiError> {
        self.post_json(
            "/projects/get_mentions",
            &serde_json::json!({ "project_id": project_id }),
        )
        .await
    }
}
