// BrandMentions API client — command-style GET requests over HTTP.
//
// Every operation hits {base}/command.php with the api_key, a `command`
// discriminator, and operation parameters in the query string. Array
// parameters use repeated `name[]` keys. Responses are a JSON envelope
// passed through as-is; a non-2xx response is fatal for that call — there
// is no meaningful synthetic fallback for third-party project data, so the
// caller must be able to tell "unavailable" from "empty".

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ApiError;

/// Paging and date-range options shared by the mention and influencer
/// listings. Zero paging values fall back to the operation's default.
#[derive(Debug, Default, Clone)]
pub struct PageOptions {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub start_period: Option<String>,
    pub end_period: Option<String>,
    pub sources: Vec<String>,
    pub countries: Vec<String>,
}

/// Configuration for the AddProject command.
#[derive(Debug, Default, Clone)]
pub struct NewProject {
    pub name: String,
    pub keyword1: String,
    pub keyword2: Option<String>,
    pub match_type1: Option<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub active_sources: Vec<String>,
}

pub struct BrandMentionsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BrandMentionsClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("brandlens/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Issue one command request and return the JSON envelope.
    async fn command(
        &self,
        command: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/command.php", self.base_url);

        debug!(command = command, "BrandMentions request");

        let mut query: Vec<(String, String)> = vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("command".to_string(), command.to_string()),
        ];
        query.extend_from_slice(params);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                ApiError::unavailable(format!("BrandMentions API unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| {
            ApiError::unavailable(format!("Failed to deserialize {command} response: {e}"))
        })
    }

    /// List all monitoring projects on the account.
    pub async fn list_projects(&self) -> Result<serde_json::Value, ApiError> {
        self.command("ListProjects", &[]).await
    }

    /// Get a project's mentions, paginated and optionally date-ranged or
    /// restricted to sources/countries.
    pub async fn get_project_mentions(
        &self,
        project_id: &str,
        options: &PageOptions,
    ) -> Result<serde_json::Value, ApiError> {
        let mut params = vec![
            ("project_id".to_string(), project_id.to_string()),
            ("page".to_string(), options.page.unwrap_or(1).to_string()),
            (
                "per_page".to_string(),
                options.per_page.unwrap_or(250).to_string(),
            ),
        ];
        push_period(&mut params, options);
        push_repeated(&mut params, "sources[]", &options.sources);
        push_repeated(&mut params, "countries[]", &options.countries);

        self.command("GetProjectMentions", &params).await
    }

    /// Get a project's influencers, paginated and optionally date-ranged.
    pub async fn get_project_influencers(
        &self,
        project_id: &str,
        options: &PageOptions,
    ) -> Result<serde_json::Value, ApiError> {
        let mut params = vec![
            ("project_id".to_string(), project_id.to_string()),
            ("page".to_string(), options.page.unwrap_or(1).to_string()),
            (
                "per_page".to_string(),
                options.per_page.unwrap_or(100).to_string(),
            ),
        ];
        push_period(&mut params, options);
        push_repeated(&mut params, "sources[]", &options.sources);

        self.command("GetProjectInfluencers", &params).await
    }

    /// Total mention count for a project.
    pub async fn get_mention_count(&self, project_id: &str) -> Result<serde_json::Value, ApiError> {
        self.command(
            "GetMentionsCount",
            &[("project_id".to_string(), project_id.to_string())],
        )
        .await
    }

    /// Create a new monitoring project.
    pub async fn add_project(&self, config: &NewProject) -> Result<serde_json::Value, ApiError> {
        let mut params = vec![
            ("name".to_string(), config.name.clone()),
            ("keyword1".to_string(), config.keyword1.clone()),
        ];
        if let Some(keyword2) = &config.keyword2 {
            params.push(("keyword2".to_string(), keyword2.clone()));
        }
        if let Some(match_type) = &config.match_type1 {
            params.push(("match_type1".to_string(), match_type.clone()));
        }
        push_repeated(&mut params, "languages[]", &config.languages);
        push_repeated(&mut params, "countries[]", &config.countries);
        push_repeated(&mut params, "active_sources[]", &config.active_sources);

        self.command("AddProject", &params).await
    }

    /// Delete a monitoring project.
    pub async fn delete_project(&self, project_id: &str) -> Result<serde_json::Value, ApiError> {
        self.command(
            "DeleteProject",
            &[("project_id".to_string(), project_id.to_string())],
        )
        .await
    }
}

fn push_period(params: &mut Vec<(String, String)>, options: &PageOptions) {
    if let Some(start) = &options.start_period {
        params.push(("start_period".to_string(), start.clone()));
    }
    if let Some(end) = &options.end_period {
        params.push(("end_period".to_string(), end.clone()));
    }
}

fn push_repeated(params: &mut Vec<(String, String)>, key: &str, values: &[String]) {
    for value in values {
        params.push((key.to_string(), value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_params_keep_order() {
        let mut params = Vec::new();
        push_repeated(
            &mut params,
            "sources[]",
            &["news".to_string(), "twitter".to_string()],
        );
        assert_eq!(params[0], ("sources[]".to_string(), "news".to_string()));
        assert_eq!(params[1], ("sources[]".to_string(), "twitter".to_string()));
    }
}
