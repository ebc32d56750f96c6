//! Client configuration

use serde::{Deserialize, Serialize};

/// Claims-backend client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the claims backend
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the environment.
    ///
    /// Variables use the `PORTAL_` prefix (`PORTAL_API_URL`,
    /// `PORTAL_TIMEOUT_SECS`); anything unset falls back to the defaults
    /// above. A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix("PORTAL").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Joins a path onto the base URL, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }
}
