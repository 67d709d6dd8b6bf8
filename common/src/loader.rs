//! Data loader contracts exposed to the UI layer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{Category, Unit};
use crate::network::NetworkAccessBehavior;
use crate::table::UnitRatios;

/// Source of categories, units and ratios for the converter.
///
/// Queries never block on I/O: a loader whose data is not ready yet returns
/// empty results and announces completion through its callback.
#[async_trait]
pub trait ConverterDataLoader: Send + Sync {
    /// Populate the loader's data.
    async fn load_data(&self);

    /// Categories in display order.
    fn load_ordered_categories(&self) -> Vec<Category>;

    /// Units of a category in display order.
    fn load_ordered_units(&self, category: &Category) -> Vec<Unit>;

    /// Ratios from a unit to every unit of its category.
    fn load_ordered_ratios(&self, unit: &Unit) -> UnitRatios;

    /// Check if this loader owns a category.
    fn supports_category(&self, category: &Category) -> bool;
}

/// Currency-specific loader operations.
#[async_trait]
pub trait CurrencyDataLoader: ConverterDataLoader {
    /// Register the UI-layer callback, replacing any previous one.
    fn set_view_model_callback(&self, callback: Arc<dyn CurrencyCallback>);

    /// Symbols of two currencies, or a pair of empty strings if either is unknown.
    fn get_currency_symbols(&self, unit1: &Unit, unit2: &Unit) -> (String, String);

    /// Localized `1 A = X B` text and its accessible variant.
    fn get_currency_ratio_equality(&self, unit1: &Unit, unit2: &Unit) -> (String, String);

    /// Localized "last updated" text, empty when nothing was loaded.
    fn get_currency_timestamp(&self) -> String;

    /// Fetch from the web even on a metered connection.
    async fn try_load_data_from_web_override(&self) -> bool;
}

/// Notifications from the currency loader to the UI layer.
pub trait CurrencyCallback: Send + Sync {
    /// A `load_data` call completed.
    fn currency_data_load_finished(&self, did_load: bool);

    /// The data timestamp changed; `is_week_old` flags outdated rates.
    fn currency_timestamp_updated(&self, timestamp: &str, is_week_old: bool);

    /// The network policy changed.
    fn network_behavior_changed(&self, behavior: NetworkAccessBehavior);

    /// A user-initiated refresh failed.
    fn user_refresh_failed(&self) {}
}
