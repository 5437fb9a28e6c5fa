//! Configuration management for the Bookshelf client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

use crate::validation::ValidationPolicy;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ApiConfig {
    /// Backend root, e.g. `http://localhost:8080`
    #[validate(url)]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let base_file = env::var("BOOKSHELF_CONFIG").unwrap_or_else(|_| "config/default".into());

        let config = Config::builder()
            .set_default("api.base_url", ApiConfig::default().base_url)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("validation.require_type", true)?
            .add_source(File::with_name(&base_file).required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables, e.g. BOOKSHELF__API__BASE_URL
            .add_source(
                Environment::with_prefix("BOOKSHELF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .set_override_option("api.api_key", env::var("API_KEY").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot work
    pub fn check(&self) -> Result<(), ConfigError> {
        self.api
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid [api] section: {}", e)))?;

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "unknown logging format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
