use crate::error::{AdvisorError, AdvisorResult};
use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the advisory endpoint.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> AdvisorResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AdvisorError::Configuration("API key is empty".into()));
        }

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from the environment (after a `.env` pass):
    /// `OPENROUTER_API_KEY` is required, `SHOPKEEPER_ADVISOR_MODEL` and
    /// `SHOPKEEPER_ADVISOR_ENDPOINT` override the defaults.
    pub fn from_env() -> AdvisorResult<Self> {
        dotenv::dotenv().ok();

        let api_key = env::var("OPENROUTER_API_KEY").map_err(|_| {
            AdvisorError::Configuration("OPENROUTER_API_KEY is not set".into())
        })?;

        let mut config = Self::new(api_key)?;
        if let Ok(model) = env::var("SHOPKEEPER_ADVISOR_MODEL") {
            config.model = model;
        }
        if let Ok(endpoint) = env::var("SHOPKEEPER_ADVISOR_ENDPOINT") {
            config.endpoint = endpoint;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_api_key() {
        assert!(matches!(
            AdvisorConfig::new(""),
            Err(AdvisorError::Configuration(_))
        ));
        assert!(matches!(
            AdvisorConfig::new("   "),
            Err(AdvisorError::Configuration(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::new("key").expect("valid config");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AdvisorConfig::new("key")
            .expect("valid config")
            .with_model("test/model")
            .with_endpoint("http://localhost:9")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.model, "test/model");
        assert_eq!(config.endpoint, "http://localhost:9");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
