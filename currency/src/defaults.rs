//! Resolution of the default from/to currency pair.

use std::collections::HashMap;

use convdata_common::SettingsStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::constants::{CURRENCY_UNIT_FROM_KEY, CURRENCY_UNIT_TO_KEY};
use crate::error::LoadResult;

const EMBEDDED_DEFAULT_PAIRS: &str = include_str!("../resources/default-currency-pairs.json");

/// A from/to currency code pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCurrencies {
    pub from: String,
    pub to: String,
}

impl SelectedCurrencies {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Where a resolved pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSource {
    Settings,
    Locale,
    Fallback,
}

/// Language tag → default currency pair.
#[derive(Debug, Clone, Default)]
pub struct DefaultPairs {
    pairs: HashMap<String, SelectedCurrencies>,
}

impl DefaultPairs {
    /// Parse a `{ "<lang>": { "from": .., "to": .. } }` document.
    pub fn from_json(json: &str) -> LoadResult<Self> {
        Ok(Self {
            pairs: serde_json::from_str(json)?,
        })
    }

    /// The pairs shipped with the crate.
    pub fn embedded() -> LoadResult<Self> {
        Self::from_json(EMBEDDED_DEFAULT_PAIRS)
    }

    /// Pair for a language tag, if listed.
    pub fn for_language(&self, language: &str) -> Option<&SelectedCurrencies> {
        self.pairs.get(language)
    }

    /// Resolve the pair to preselect.
    ///
    /// Priority: both codes persisted in settings, then the entry for
    /// `language`, then `fallback`.
    pub async fn resolve(
        &self,
        settings: &dyn SettingsStore,
        language: &str,
        fallback: &SelectedCurrencies,
    ) -> (SelectedCurrencies, PairSource) {
        let from = settings.get_string(CURRENCY_UNIT_FROM_KEY).await;
        let to = settings.get_string(CURRENCY_UNIT_TO_KEY).await;
        if let (Some(from), Some(to)) = (from, to) {
            debug!(from = %from, to = %to, "Using persisted currency selection");
            return (SelectedCurrencies { from, to }, PairSource::Settings);
        }

        match self.for_language(language) {
            Some(pair) => {
                debug!(language, from = %pair.from, to = %pair.to, "Using locale default currency pair");
                (pair.clone(), PairSource::Locale)
            }
            None => (fallback.clone(), PairSource::Fallback),
        }
    }
}
