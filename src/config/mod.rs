use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Spoonacular API key, sent as the `apiKey` query parameter.
    pub api_key: String,

    /// Base URL of the recipe API. Overridable for local testing.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on each outbound call.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_api_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config: Self = envy::from_env()?;
        config.validate()
    }

    /// Build a config from explicit key/value pairs, using the same rules as
    /// [`AppConfig::from_env`].
    pub fn from_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(vars)?;
        config.validate()
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "UPSTREAM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
