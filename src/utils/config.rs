use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://v2.api.noroff.dev";
pub const API_BASE_URL_VAR: &str = "HOLIDAZE_API_BASE_URL";
pub const API_KEY_VAR: &str = "HOLIDAZE_API_KEY";

/// Where the REST API lives and the vendor key it expects
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set; export your Noroff API key before starting Holidaze")]
    MissingApiKey(&'static str),
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;

        log::info!("[Config] API base URL: {}", base_url);
        Ok(Self::new(base_url, api_key))
    }

    /// Absolute URL for an API path such as `/holidaze/venues`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
