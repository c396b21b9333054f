use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// BrandMentions API key (BRANDMENTIONS_API_KEY).
    pub brandmentions_api_key: String,
    /// BrandMentions API base URL (defaults to https://api.brandmentions.com).
    pub brandmentions_api_url: String,
    /// Project-ingest backend base URL (defaults to http://localhost:8000).
    pub backend_url: String,
    /// SQLite database path (defaults to ./brandlens.db).
    pub db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the API key has no default — everything else falls back to a
    /// sensible local value so `init` and `status` work out of the box.
    pub fn load() -> Result<Self> {
        Ok(Self {
            brandmentions_api_key: env::var("BRANDMENTIONS_API_KEY").unwrap_or_default(),
            brandmentions_api_url: env::var("BRANDMENTIONS_API_URL")
                .unwrap_or_else(|_| crate::upstream::DEFAULT_BRANDMENTIONS_URL.to_string()),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            db_path: env::var("BRANDLENS_DB_PATH").unwrap_or_else(|_| "./brandlens.db".to_string()),
        })
    }

    /// Check that the BrandMentions API key is configured.
    /// Call this before any operation that talks to the third-party API.
    pub fn require_api_key(&self) -> Result<()> {
        if self.brandmentions_api_key.is_empty() {
            anyhow::bail!(
                "BRANDMENTIONS_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
