//! Currency loader configuration.

use chrono::Duration;

use convdata_common::time::constants::{cache_max_age, stale_warning_age};

/// Persisted keys and cache file names.
pub mod constants {
    /// Settings key of the cache timestamp.
    pub const CACHE_TIMESTAMP_KEY: &str = "CURRENCY_CONVERTER_TIMESTAMP";
    /// Settings key of the language the cache was fetched in.
    pub const CACHE_LANGCODE_KEY: &str = "CURRENCY_CONVERTER_LANGCODE";
    /// Cache file holding the raw metadata payload.
    pub const STATIC_DATA_FILENAME: &str = "CURRENCY_CONVERTER_STATIC_DATA.txt";
    /// Cache file holding the raw ratios payload.
    pub const ALL_RATIOS_DATA_FILENAME: &str = "CURRENCY_CONVERTER_ALL_RATIOS_DATA.txt";
    /// Settings key of the last selected source currency.
    pub const CURRENCY_UNIT_FROM_KEY: &str = "CURRENCY_UNIT_FROM_KEY";
    /// Settings key of the last selected target currency.
    pub const CURRENCY_UNIT_TO_KEY: &str = "CURRENCY_UNIT_TO_KEY";

    pub const DEFAULT_SOURCE_CURRENCY: &str = "USD";
    pub const DEFAULT_FROM_CURRENCY: &str = "USD";
    pub const DEFAULT_TO_CURRENCY: &str = "EUR";
    pub const DEFAULT_LANGUAGE: &str = "en-US";
}

/// Configuration for the currency loader.
#[derive(Debug, Clone)]
pub struct CurrencyLoaderConfig {
    /// Currency the ratios payload is expressed against.
    pub source_currency: String,
    /// Source currency selected when no preference applies.
    pub fallback_from: String,
    /// Target currency selected when no preference applies.
    pub fallback_to: String,
    /// Language tag used for localized metadata and cache validation.
    pub response_language: String,
    /// Currency names are shown right-to-left.
    pub is_rtl_language: bool,
    /// Age after which cached data triggers a refresh attempt.
    pub cache_max_age: Duration,
    /// Age after which cached data is reported as outdated.
    pub stale_warning_age: Duration,
    /// Locale default-pair document; the embedded one when `None`.
    pub default_pairs_json: Option<String>,
}

impl Default for CurrencyLoaderConfig {
    fn default() -> Self {
        Self {
            source_currency: constants::DEFAULT_SOURCE_CURRENCY.to_string(),
            fallback_from: constants::DEFAULT_FROM_CURRENCY.to_string(),
            fallback_to: constants::DEFAULT_TO_CURRENCY.to_string(),
            response_language: constants::DEFAULT_LANGUAGE.to_string(),
            is_rtl_language: false,
            cache_max_age: cache_max_age(),
            stale_warning_age: stale_warning_age(),
            default_pairs_json: None,
        }
    }
}

impl CurrencyLoaderConfig {
    /// Use a response language, deriving the text direction from it.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = language.into();
        self.is_rtl_language = is_rtl_language(&self.response_language);
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        for (name, code) in [
            ("source currency", &self.source_currency),
            ("fallback from currency", &self.fallback_from),
            ("fallback to currency", &self.fallback_to),
        ] {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(format!("Invalid {}: {:?}", name, code));
            }
        }

        if self.response_language.is_empty() {
            return Err("Response language cannot be empty".to_string());
        }

        if self.cache_max_age > self.stale_warning_age {
            return Err("Cache max age cannot exceed the stale warning age".to_string());
        }

        Ok(())
    }
}

/// Check if a language tag denotes a right-to-left script.
pub fn is_rtl_language(language: &str) -> bool {
    let primary = language.split(['-', '_']).next().unwrap_or_default();
    matches!(
        primary.to_ascii_lowercase().as_str(),
        "ar" | "he" | "fa" | "ur" | "ps" | "sd" | "ug" | "yi" | "dv" | "ku"
    )
}
