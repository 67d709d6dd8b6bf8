//! The conversion service facade.

use std::sync::Arc;

use async_trait::async_trait;
use convdata_common::table::UnitRatios;
use convdata_common::{
    Category, CategoryId, ConvDataError, ConverterDataLoader, CurrencyCallback, CurrencyDataLoader,
    NetworkAccessBehavior, ResourceStrings, StringProvider, Unit, UnitId,
};
use convdata_currency::{
    CurrencyHttpClient, CurrencyLoader, CurrencyLoaderDeps, FileCacheStore, HttpCurrencyClient,
    JsonFileSettingsStore, LoadResult, NetworkMonitor,
};
use convdata_units::{RegionPreferences, StaticDataLoader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ServiceConfig;

/// Routes every query to the static loader or the currency loader.
///
/// Static categories are available as soon as the service exists; the
/// currency unit list stays empty until a currency load completes.
pub struct ConversionService {
    static_data: StaticDataLoader,
    currency: CurrencyLoader,
    network: Option<Arc<NetworkMonitor>>,
}

impl ConversionService {
    /// Create a service over two loaders.
    pub fn new(static_data: StaticDataLoader, currency: CurrencyLoader) -> Self {
        Self {
            static_data,
            currency,
            network: None,
        }
    }

    /// Keep a handle on the monitor feeding the currency loader.
    pub fn with_network_monitor(mut self, network: Arc<NetworkMonitor>) -> Self {
        self.network = Some(network);
        self
    }

    /// Wire up the production collaborators described by `config`.
    pub async fn from_config(config: &ServiceConfig) -> LoadResult<Self> {
        let strings: Arc<dyn StringProvider> = Arc::new(ResourceStrings::en_us());
        let static_data = StaticDataLoader::new(strings.clone(), RegionPreferences::for_region(&config.region_code));

        let client = match &config.currency_endpoint {
            Some(endpoint) => {
                let client: Arc<dyn CurrencyHttpClient> =
                    Arc::new(HttpCurrencyClient::new(endpoint.as_str(), config.http_timeout)?);
                Some(client)
            }
            None => {
                warn!("No currency endpoint configured, only cached currency data is available");
                None
            }
        };

        let network = Arc::new(NetworkMonitor::new(config.network));
        let settings = Arc::new(JsonFileSettingsStore::open(&config.settings_path).await?);

        let currency = CurrencyLoader::new(
            config.currency_loader_config(),
            CurrencyLoaderDeps {
                strings,
                client,
                cache: Arc::new(FileCacheStore::new(&config.cache_dir)),
                settings,
                network: network.clone(),
            },
        )?;

        info!(
            region = %config.region_code,
            language = %config.language,
            network = %config.network,
            "Conversion service configured"
        );

        Ok(Self::new(static_data, currency).with_network_monitor(network))
    }

    /// Currency-specific operations.
    pub fn currency(&self) -> &CurrencyLoader {
        &self.currency
    }

    /// Report a platform network change to the currency loader.
    pub fn set_network_behavior(&self, behavior: NetworkAccessBehavior) {
        match &self.network {
            Some(network) => network.set(behavior),
            None => warn!(behavior = %behavior, "No network monitor attached"),
        }
    }

    /// Register the UI-layer callback.
    pub fn set_view_model_callback(&self, callback: Arc<dyn CurrencyCallback>) {
        self.currency.set_view_model_callback(callback);
    }

    /// Run the currency load in the background.
    pub fn spawn_currency_load(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.currency.load_data().await;
        })
    }

    /// Look up a category by id.
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.load_ordered_categories().into_iter().find(|c| c.id == id)
    }

    /// Find a unit of a category by abbreviation, exact matches first.
    pub fn find_unit(&self, category: &Category, abbreviation: &str) -> Option<Unit> {
        let units = self.load_ordered_units(category);
        let exact = units.iter().position(|u| u.abbreviation == abbreviation);
        let index = exact.or_else(|| {
            units
                .iter()
                .position(|u| u.abbreviation.eq_ignore_ascii_case(abbreviation))
        })?;
        units.into_iter().nth(index)
    }

    /// Convert a value between two units given by abbreviation.
    pub fn convert(&self, category: CategoryId, value: f64, from: &str, to: &str) -> convdata_common::Result<f64> {
        let category = self
            .category(category)
            .ok_or(ConvDataError::UnknownCategory(category))?;
        let from_unit = self
            .find_unit(&category, from)
            .ok_or_else(|| ConvDataError::UnknownUnit(from.to_string()))?;
        let to_unit = self
            .find_unit(&category, to)
            .ok_or_else(|| ConvDataError::UnknownUnit(to.to_string()))?;

        let data = self
            .load_ordered_ratios(&from_unit)
            .get(&to_unit)
            .copied()
            .ok_or_else(|| ConvDataError::NoConversion {
                from: from_unit.id.clone(),
                to: to_unit.id.clone(),
            })?;

        Ok(data.convert(value))
    }

    fn loader_for(&self, category: &Category) -> &dyn ConverterDataLoader {
        if self.currency.supports_category(category) {
            &self.currency
        } else {
            &self.static_data
        }
    }
}

#[async_trait]
impl ConverterDataLoader for ConversionService {
    async fn load_data(&self) {
        self.static_data.load_data().await;
        self.currency.load_data().await;
    }

    fn load_ordered_categories(&self) -> Vec<Category> {
        self.static_data.load_ordered_categories()
    }

    fn load_ordered_units(&self, category: &Category) -> Vec<Unit> {
        self.loader_for(category).load_ordered_units(category)
    }

    fn load_ordered_ratios(&self, unit: &Unit) -> UnitRatios {
        match unit.id {
            UnitId::Currency(_) => self.currency.load_ordered_ratios(unit),
            UnitId::Static(_) => self.static_data.load_ordered_ratios(unit),
        }
    }

    fn supports_category(&self, category: &Category) -> bool {
        self.static_data.supports_category(category) || self.currency.supports_category(category)
    }
}

/// Forwards currency loader notifications to the log.
pub struct TracingCallback;

impl CurrencyCallback for TracingCallback {
    fn currency_data_load_finished(&self, did_load: bool) {
        if did_load {
            info!("Currency data available");
        } else {
            warn!("Currency data unavailable");
        }
    }

    fn currency_timestamp_updated(&self, timestamp: &str, is_week_old: bool) {
        info!(timestamp, is_week_old, "Currency timestamp updated");
    }

    fn network_behavior_changed(&self, behavior: NetworkAccessBehavior) {
        info!(behavior = %behavior, "Network behavior changed");
    }

    fn user_refresh_failed(&self) {
        warn!("Currency refresh failed");
    }
}
