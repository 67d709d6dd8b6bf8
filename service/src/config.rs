//! Service configuration.

use std::path::PathBuf;
use std::time::Duration;

use convdata_common::NetworkAccessBehavior;
use convdata_currency::CurrencyLoaderConfig;

/// Main service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Two-letter region code deciding default units.
    pub region_code: String,
    /// Language tag for currency names and cache validation.
    pub language: String,
    /// Base URL of the currency data service. Without one only cached
    /// currency data is used.
    pub currency_endpoint: Option<String>,
    /// Directory for cached currency payloads.
    pub cache_dir: PathBuf,
    /// JSON file holding persisted settings.
    pub settings_path: PathBuf,
    /// Timeout of each currency HTTP request.
    pub http_timeout: Duration,
    /// Network behavior reported at startup.
    pub network: NetworkAccessBehavior,
    /// Log level.
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            region_code: "US".to_string(),
            language: "en-US".to_string(),
            currency_endpoint: None,
            cache_dir: PathBuf::from("convdata-cache"),
            settings_path: PathBuf::from("convdata-settings.json"),
            http_timeout: Duration::from_secs(10),
            network: NetworkAccessBehavior::Normal,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(region) = std::env::var("CONVDATA_REGION") {
            config.region_code = region.to_ascii_uppercase();
        }

        if let Ok(language) = std::env::var("CONVDATA_LANGUAGE") {
            config.language = language;
        }

        if let Ok(endpoint) = std::env::var("CONVDATA_CURRENCY_ENDPOINT") {
            if !endpoint.is_empty() {
                config.currency_endpoint = Some(endpoint);
            }
        }

        if let Ok(dir) = std::env::var("CONVDATA_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("CONVDATA_SETTINGS_PATH") {
            config.settings_path = PathBuf::from(path);
        }

        if let Ok(secs) = std::env::var("CONVDATA_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.http_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(network) = std::env::var("CONVDATA_NETWORK") {
            if let Ok(network) = network.parse() {
                config.network = network;
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.region_code.len() != 2 || !self.region_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid region code: {:?}", self.region_code));
        }

        if self.language.is_empty() {
            return Err("Language cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.currency_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!("Currency endpoint must be an http(s) URL: {}", endpoint));
            }
        }

        if self.http_timeout.is_zero() {
            return Err("HTTP timeout cannot be 0".to_string());
        }

        self.currency_loader_config().validate()
    }

    /// Currency loader settings derived from this configuration.
    pub fn currency_loader_config(&self) -> CurrencyLoaderConfig {
        CurrencyLoaderConfig::default().with_language(&self.language)
    }
}
