//! The currency loader state machine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use convdata_common::table::UnitRatios;
use convdata_common::time::{self, Timestamp};
use convdata_common::{
    Category, CategoryId, ConversionData, ConversionTable, ConverterDataLoader, CurrencyCallback, CurrencyCode,
    CurrencyDataLoader, CurrencyRatio, CurrencyStaticData, CurrencyUnitMetadata, NetworkAccessBehavior,
    SettingsStore, StringProvider, Unit,
};
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::cache::CacheStore;
use crate::client::CurrencyHttpClient;
use crate::config::constants::{
    ALL_RATIOS_DATA_FILENAME, CACHE_LANGCODE_KEY, CACHE_TIMESTAMP_KEY, CURRENCY_UNIT_FROM_KEY, CURRENCY_UNIT_TO_KEY,
    STATIC_DATA_FILENAME,
};
use crate::config::CurrencyLoaderConfig;
use crate::defaults::{DefaultPairs, SelectedCurrencies};
use crate::error::{LoadError, LoadResult};
use crate::format;
use crate::network::NetworkPolicyMonitor;
use crate::parse::{parse_ratios, parse_static_data};

/// Outcome of the most recent load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyLoadStatus {
    NotLoaded,
    FailedToLoad,
    LoadedFromCache,
    LoadedFromWeb,
}

impl fmt::Display for CurrencyLoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurrencyLoadStatus::NotLoaded => "not_loaded",
            CurrencyLoadStatus::FailedToLoad => "failed_to_load",
            CurrencyLoadStatus::LoadedFromCache => "loaded_from_cache",
            CurrencyLoadStatus::LoadedFromWeb => "loaded_from_web",
        };
        write!(f, "{}", name)
    }
}

/// Collaborators the loader reads from and writes to.
pub struct CurrencyLoaderDeps {
    pub strings: Arc<dyn StringProvider>,
    /// Without a client only cached data can be loaded.
    pub client: Option<Arc<dyn CurrencyHttpClient>>,
    pub cache: Arc<dyn CacheStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub network: Arc<dyn NetworkPolicyMonitor>,
}

/// Currency units, their ratios and symbols. Replaced wholesale on every load.
struct CurrencyTable {
    table: ConversionTable,
    metadata: HashMap<Unit, CurrencyUnitMetadata>,
}

struct Inner {
    config: CurrencyLoaderConfig,
    default_pairs: DefaultPairs,
    deps: CurrencyLoaderDeps,
    currency: Mutex<CurrencyTable>,
    status: RwLock<CurrencyLoadStatus>,
    behavior: RwLock<NetworkAccessBehavior>,
    callback: RwLock<Option<Arc<dyn CurrencyCallback>>>,
    cache_timestamp: RwLock<Option<Timestamp>>,
    metered_override: AtomicBool,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn callback(&self) -> Option<Arc<dyn CurrencyCallback>> {
        self.callback.read().clone()
    }

    fn on_network_behavior_changed(&self, behavior: NetworkAccessBehavior) {
        *self.behavior.write() = behavior;
        debug!(behavior = %behavior, "Currency loader network behavior updated");

        if let Some(callback) = self.callback() {
            callback.network_behavior_changed(behavior);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.get_mut().take() {
            watcher.abort();
        }
    }
}

/// Loads currency units and ratios from the cache or the web.
///
/// Every public operation degrades to a boolean or empty result; failures are
/// logged and never returned to the caller.
pub struct CurrencyLoader {
    inner: Arc<Inner>,
}

impl CurrencyLoader {
    /// Create a loader. Nothing is loaded until `load_data` runs.
    pub fn new(config: CurrencyLoaderConfig, deps: CurrencyLoaderDeps) -> LoadResult<Self> {
        let default_pairs = match &config.default_pairs_json {
            Some(json) => DefaultPairs::from_json(json)?,
            None => DefaultPairs::embedded()?,
        };

        let mut table = ConversionTable::new();
        table.push_category(currency_category(deps.strings.as_ref()));

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                default_pairs,
                deps,
                currency: Mutex::new(CurrencyTable {
                    table,
                    metadata: HashMap::new(),
                }),
                status: RwLock::new(CurrencyLoadStatus::NotLoaded),
                behavior: RwLock::new(NetworkAccessBehavior::Normal),
                callback: RwLock::new(None),
                cache_timestamp: RwLock::new(None),
                metered_override: AtomicBool::new(false),
                watcher: Mutex::new(None),
            }),
        })
    }

    pub fn load_status(&self) -> CurrencyLoadStatus {
        *self.inner.status.read()
    }

    /// Check if currency data is available.
    pub fn load_finished(&self) -> bool {
        matches!(
            self.load_status(),
            CurrencyLoadStatus::LoadedFromCache | CurrencyLoadStatus::LoadedFromWeb
        )
    }

    pub fn loaded_from_cache(&self) -> bool {
        self.load_status() == CurrencyLoadStatus::LoadedFromCache
    }

    pub fn loaded_from_web(&self) -> bool {
        self.load_status() == CurrencyLoadStatus::LoadedFromWeb
    }

    /// Network behavior last reported by the monitor.
    pub fn network_behavior(&self) -> NetworkAccessBehavior {
        *self.inner.behavior.read()
    }

    /// Time the loaded data was fetched.
    pub fn cache_timestamp(&self) -> Option<Timestamp> {
        *self.inner.cache_timestamp.read()
    }

    /// Check if the loaded data is older than the stale warning age.
    pub fn is_week_old(&self) -> bool {
        self.cache_timestamp()
            .map(|ts| time::is_older_than(ts, self.inner.config.stale_warning_age))
            .unwrap_or(false)
    }

    fn set_status(&self, status: CurrencyLoadStatus) {
        *self.inner.status.write() = status;
    }

    fn reset_load_status(&self) {
        self.set_status(CurrencyLoadStatus::NotLoaded);
    }

    /// Follow the network monitor, replacing any earlier subscription.
    fn register_for_network_changes(&self) {
        let mut changes = self.inner.deps.network.subscribe();
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        let watcher = tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let behavior = *changes.borrow_and_update();
                match weak.upgrade() {
                    Some(inner) => inner.on_network_behavior_changed(behavior),
                    None => break,
                }
            }
        });

        if let Some(previous) = self.inner.watcher.lock().replace(watcher) {
            previous.abort();
        }

        self.inner
            .on_network_behavior_changed(self.inner.deps.network.current());
    }

    /// Cache first, then web.
    async fn load_from_cache_or_web(&self) -> bool {
        match self.try_load_data_from_cache().await {
            Ok(true) => return true,
            Ok(false) => debug!("Currency cache unavailable"),
            Err(e) => warn!(error = %e, "Failed to load currency data from cache"),
        }

        self.load_from_web().await
    }

    async fn load_from_web(&self) -> bool {
        match self.try_load_data_from_web().await {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Failed to load currency data from web");
                false
            }
        }
    }

    /// Load from the cache, refreshing from the web first when it is stale.
    ///
    /// `Ok(false)` means there is no usable cache.
    #[instrument(skip(self))]
    async fn try_load_data_from_cache(&self) -> LoadResult<bool> {
        self.reset_load_status();

        let settings = &self.inner.deps.settings;
        let Some(timestamp) = settings.get_timestamp(CACHE_TIMESTAMP_KEY).await else {
            return Ok(false);
        };
        *self.inner.cache_timestamp.write() = Some(timestamp);

        if time::is_older_than(timestamp, self.inner.config.cache_max_age)
            && self.network_behavior() == NetworkAccessBehavior::Normal
        {
            info!(cached_at = %timestamp, "Currency cache is stale, refreshing from web");
            if self.load_from_web().await {
                return Ok(true);
            }
        }

        self.try_finish_loading_from_cache().await
    }

    async fn try_finish_loading_from_cache(&self) -> LoadResult<bool> {
        let language = &self.inner.config.response_language;
        let cached_language = self.inner.deps.settings.get_string(CACHE_LANGCODE_KEY).await;
        if cached_language.as_deref() != Some(language.as_str()) {
            debug!(
                cached = ?cached_language,
                current = %language,
                "Currency cache language mismatch"
            );
            return Ok(false);
        }

        let cache = &self.inner.deps.cache;
        let static_data = parse_static_data(&cache.read(STATIC_DATA_FILENAME).await?)?;
        let ratios = parse_ratios(
            &cache.read(ALL_RATIOS_DATA_FILENAME).await?,
            &self.inner.config.source_currency,
        )?;

        self.set_status(CurrencyLoadStatus::LoadedFromCache);
        self.finalize_units(&static_data, &ratios).await;
        Ok(true)
    }

    /// Fetch both payloads, persist them and install the units.
    ///
    /// `Ok(false)` means the network policy refused the fetch.
    #[instrument(skip(self))]
    async fn try_load_data_from_web(&self) -> LoadResult<bool> {
        self.reset_load_status();

        let client = self.inner.deps.client.as_ref().ok_or(LoadError::MissingClient)?;

        let behavior = self.network_behavior();
        if !behavior.permits_web(self.inner.metered_override.load(Ordering::SeqCst)) {
            debug!(behavior = %behavior, "Web load refused by network policy");
            return Ok(false);
        }

        let config = &self.inner.config;
        let (metadata, ratios) = tokio::try_join!(
            client.get_currency_metadata(&config.response_language),
            client.get_currency_ratios(&config.source_currency),
        )?;

        let static_data = parse_static_data(&metadata)?;
        let ratio_map = parse_ratios(&ratios, &config.source_currency)?;

        let fetched_at = time::now();
        *self.inner.cache_timestamp.write() = Some(fetched_at);
        self.save_to_cache(&metadata, &ratios, fetched_at).await;

        self.set_status(CurrencyLoadStatus::LoadedFromWeb);
        self.finalize_units(&static_data, &ratio_map).await;

        info!(currencies = static_data.len(), "Currency data loaded from web");
        Ok(true)
    }

    /// Best-effort persistence of a fresh web payload.
    async fn save_to_cache(&self, metadata: &str, ratios: &str, fetched_at: Timestamp) {
        let cache = &self.inner.deps.cache;
        for (name, contents) in [(STATIC_DATA_FILENAME, metadata), (ALL_RATIOS_DATA_FILENAME, ratios)] {
            if let Err(e) = cache.write(name, contents).await {
                warn!(file = name, error = %e, "Failed to write currency cache");
            }
        }

        let settings = &self.inner.deps.settings;
        if let Err(e) = settings.set_timestamp(CACHE_TIMESTAMP_KEY, fetched_at).await {
            warn!(error = %e, code = e.error_code(), "Failed to persist currency cache timestamp");
        }
        if let Err(e) = settings
            .set_string(CACHE_LANGCODE_KEY, &self.inner.config.response_language)
            .await
        {
            warn!(error = %e, code = e.error_code(), "Failed to persist currency cache language");
        }
    }

    /// Join metadata and ratios into units, select the default pair and
    /// replace the currency table.
    async fn finalize_units(&self, static_data: &[CurrencyStaticData], ratios: &HashMap<String, CurrencyRatio>) {
        let config = &self.inner.config;
        let fallback = SelectedCurrencies::new(&config.fallback_from, &config.fallback_to);
        let (mut selected, source) = self
            .inner
            .default_pairs
            .resolve(
                self.inner.deps.settings.as_ref(),
                &config.response_language,
                &fallback,
            )
            .await;

        {
            let mut currency = self.inner.currency.lock();

            let mut seen = HashSet::new();
            let mut units = Vec::new();
            let mut rates = Vec::new();
            let mut metadata = HashMap::new();

            for record in static_data {
                let Some(ratio) = ratios.get(&record.currency_code) else {
                    continue;
                };
                if !(ratio.ratio > 0.0) || !seen.insert(record.currency_code.as_str()) {
                    continue;
                }

                let unit = Unit::currency(
                    CurrencyCode::new(&record.currency_code),
                    &record.currency_name,
                    &record.country_name,
                    config.is_rtl_language,
                    record.currency_code == selected.from,
                    record.currency_code == selected.to,
                );

                metadata.insert(unit.clone(), CurrencyUnitMetadata::new(&record.currency_symbol));
                units.push(unit);
                rates.push(ratio.ratio);
            }

            let has_source = units.iter().any(|u| u.is_conversion_source);
            let has_target = units.iter().any(|u| u.is_conversion_target);
            if !(has_source && has_target) {
                debug!(
                    from = %selected.from,
                    to = %selected.to,
                    source = ?source,
                    "Selected currencies unavailable, using fallback pair"
                );
                guarantee_selected_units(&mut units, &fallback);
                selected = fallback;
            }

            let ratio_map = pivot_ratios(&units, &rates);
            currency.table.replace_category(CategoryId::Currency, units, ratio_map);
            currency.metadata = metadata;

            debug!(
                currencies = currency.metadata.len(),
                status = %self.load_status(),
                "Installed currency units"
            );
        }

        self.save_selected_currencies(&selected).await;
    }

    async fn save_selected_currencies(&self, selected: &SelectedCurrencies) {
        let settings = &self.inner.deps.settings;
        for (key, code) in [(CURRENCY_UNIT_FROM_KEY, &selected.from), (CURRENCY_UNIT_TO_KEY, &selected.to)] {
            if let Err(e) = settings.set_string(key, code).await {
                warn!(key, error = %e, "Failed to persist selected currency");
            }
        }
    }

    async fn update_displayed_timestamp(&self) {
        if let Some(callback) = self.inner.callback() {
            callback.currency_timestamp_updated(&self.get_currency_timestamp(), self.is_week_old());
        }
    }

    fn notify_data_load_finished(&self) {
        let did_load = self.load_finished();
        if !did_load {
            self.set_status(CurrencyLoadStatus::FailedToLoad);
        }

        info!(did_load, status = %self.load_status(), "Currency data load finished");
        if let Some(callback) = self.inner.callback() {
            callback.currency_data_load_finished(did_load);
        }
    }
}

fn currency_category(strings: &dyn StringProvider) -> Category {
    let id = CategoryId::Currency;
    Category::new(
        id,
        strings.localized(&format!("CategoryName_{}", id.resource_key())),
        id.supports_negative(),
    )
}

/// Clear every selection flag, then select the fallback pair.
fn guarantee_selected_units(units: &mut [Unit], fallback: &SelectedCurrencies) {
    for unit in units.iter_mut() {
        unit.is_conversion_source = false;
        unit.is_conversion_target = false;
    }

    if let Some(unit) = units.iter_mut().find(|u| u.abbreviation == fallback.from) {
        unit.is_conversion_source = true;
    }
    if let Some(unit) = units.iter_mut().find(|u| u.abbreviation == fallback.to) {
        unit.is_conversion_target = true;
    }
}

/// `ratio(a→b) = rate(b) / rate(a)` where rates share one source currency.
fn pivot_ratios(units: &[Unit], rates: &[f64]) -> HashMap<Unit, UnitRatios> {
    units
        .iter()
        .zip(rates)
        .map(|(from, from_rate)| {
            let ratios = units
                .iter()
                .zip(rates)
                .map(|(to, to_rate)| (to.clone(), ConversionData::linear(to_rate / from_rate)))
                .collect();
            (from.clone(), ratios)
        })
        .collect()
}

#[async_trait]
impl ConverterDataLoader for CurrencyLoader {
    #[instrument(skip(self))]
    async fn load_data(&self) {
        self.register_for_network_changes();

        if !self.load_finished() {
            self.load_from_cache_or_web().await;
        }

        self.update_displayed_timestamp().await;
        self.notify_data_load_finished();
    }

    fn load_ordered_categories(&self) -> Vec<Category> {
        self.inner.currency.lock().table.categories().to_vec()
    }

    fn load_ordered_units(&self, category: &Category) -> Vec<Unit> {
        if !self.supports_category(category) {
            return Vec::new();
        }

        self.inner
            .currency
            .lock()
            .table
            .units(CategoryId::Currency)
            .map(|units| units.to_vec())
            .unwrap_or_default()
    }

    fn load_ordered_ratios(&self, unit: &Unit) -> UnitRatios {
        self.inner
            .currency
            .lock()
            .table
            .ratios(unit)
            .cloned()
            .unwrap_or_default()
    }

    fn supports_category(&self, category: &Category) -> bool {
        category.id == CategoryId::Currency
    }
}

#[async_trait]
impl CurrencyDataLoader for CurrencyLoader {
    fn set_view_model_callback(&self, callback: Arc<dyn CurrencyCallback>) {
        *self.inner.callback.write() = Some(callback);
        self.inner.on_network_behavior_changed(self.network_behavior());
    }

    fn get_currency_symbols(&self, unit1: &Unit, unit2: &Unit) -> (String, String) {
        let currency = self.inner.currency.lock();
        match (currency.metadata.get(unit1), currency.metadata.get(unit2)) {
            (Some(a), Some(b)) => (a.symbol.clone(), b.symbol.clone()),
            _ => (String::new(), String::new()),
        }
    }

    fn get_currency_ratio_equality(&self, unit1: &Unit, unit2: &Unit) -> (String, String) {
        let ratio = self.inner.currency.lock().table.ratio(unit1, unit2);

        let equality = ratio.and_then(|data| {
            format::ratio_equality(
                self.inner.deps.strings.as_ref(),
                data.ratio,
                (&unit1.abbreviation, &unit1.accessible_name),
                (&unit2.abbreviation, &unit2.accessible_name),
            )
        });

        equality.unwrap_or_else(|| {
            debug!(from = %unit1.id, to = %unit2.id, "No currency ratio for equality");
            (String::new(), String::new())
        })
    }

    fn get_currency_timestamp(&self) -> String {
        self.cache_timestamp()
            .map(|ts| format::format_timestamp(self.inner.deps.strings.as_ref(), ts))
            .unwrap_or_default()
    }

    #[instrument(skip(self))]
    async fn try_load_data_from_web_override(&self) -> bool {
        self.inner.metered_override.store(true, Ordering::SeqCst);

        let loaded = self.load_from_web().await;
        if loaded {
            self.update_displayed_timestamp().await;
        } else {
            self.set_status(CurrencyLoadStatus::FailedToLoad);
            warn!("User requested currency refresh failed");
            if let Some(callback) = self.inner.callback() {
                callback.user_refresh_failed();
            }
        }

        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::client::MockCurrencyClient;
    use crate::network::NetworkMonitor;
    use crate::settings::MemorySettingsStore;
    use chrono::Duration;
    use convdata_common::{ResourceStrings, UnitId};

    const FOUR_METADATA: &str = r#"[
        {"CountryCode":"USA","CountryName":"United States","CurrencyCode":"USD","CurrencyName":"Dollar","CurrencySymbol":"$"},
        {"CountryCode":"EUR","CountryName":"Europe","CurrencyCode":"EUR","CurrencyName":"Euro","CurrencySymbol":"€"},
        {"CountryCode":"GBR","CountryName":"United Kingdom","CurrencyCode":"GBP","CurrencyName":"Pound","CurrencySymbol":"£"},
        {"CountryCode":"JPN","CountryName":"Japan","CurrencyCode":"JPY","CurrencyName":"Yen","CurrencySymbol":"¥"}
    ]"#;

    const FOUR_RATIOS: &str = r#"[
        {"An":"USD","Rt":1},
        {"An":"EUR","Rt":0.91234567},
        {"An":"GBP","Rt":0.79},
        {"An":"JPY","Rt":151.2},
        {"An":"XXX","Rt":0}
    ]"#;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        LoadFinished(bool),
        Timestamp(String, bool),
        Network(NetworkAccessBehavior),
        RefreshFailed,
    }

    #[derive(Default)]
    struct RecordingCallback {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingCallback {
        fn events(&self) -> Vec<Event> {
            self.events.lock().clone()
        }

        fn load_finished(&self) -> Vec<bool> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::LoadFinished(did_load) => Some(did_load),
                    _ => None,
                })
                .collect()
        }
    }

    impl CurrencyCallback for RecordingCallback {
        fn currency_data_load_finished(&self, did_load: bool) {
            self.events.lock().push(Event::LoadFinished(did_load));
        }

        fn currency_timestamp_updated(&self, timestamp: &str, is_week_old: bool) {
            self.events.lock().push(Event::Timestamp(timestamp.to_string(), is_week_old));
        }

        fn network_behavior_changed(&self, behavior: NetworkAccessBehavior) {
            self.events.lock().push(Event::Network(behavior));
        }

        fn user_refresh_failed(&self) {
            self.events.lock().push(Event::RefreshFailed);
        }
    }

    struct Harness {
        loader: CurrencyLoader,
        client: Arc<MockCurrencyClient>,
        cache: Arc<MemoryCacheStore>,
        settings: Arc<MemorySettingsStore>,
        network: Arc<NetworkMonitor>,
        callback: Arc<RecordingCallback>,
    }

    impl Harness {
        fn new(client: MockCurrencyClient) -> Self {
            Self::with_behavior(client, NetworkAccessBehavior::Normal)
        }

        fn with_behavior(client: MockCurrencyClient, behavior: NetworkAccessBehavior) -> Self {
            let client = Arc::new(client);
            let cache = Arc::new(MemoryCacheStore::new());
            let settings = Arc::new(MemorySettingsStore::new());
            let network = Arc::new(NetworkMonitor::new(behavior));
            let callback = Arc::new(RecordingCallback::default());

            let loader = CurrencyLoader::new(
                CurrencyLoaderConfig::default(),
                CurrencyLoaderDeps {
                    strings: Arc::new(ResourceStrings::en_us()),
                    client: Some(client.clone() as Arc<dyn CurrencyHttpClient>),
                    cache: cache.clone(),
                    settings: settings.clone(),
                    network: network.clone(),
                },
            )
            .unwrap();
            loader.set_view_model_callback(callback.clone());

            Self {
                loader,
                client,
                cache,
                settings,
                network,
                callback,
            }
        }

        async fn seed_cache(&self, age: Duration, language: &str, ratios: &str) {
            self.cache
                .write(STATIC_DATA_FILENAME, MockCurrencyClient::METADATA)
                .await
                .unwrap();
            self.cache.write(ALL_RATIOS_DATA_FILENAME, ratios).await.unwrap();
            self.settings
                .set_timestamp(CACHE_TIMESTAMP_KEY, time::now() - age)
                .await
                .unwrap();
            self.settings.set_string(CACHE_LANGCODE_KEY, language).await.unwrap();
        }

        fn currency_units(&self) -> Vec<Unit> {
            let category = Category::new(CategoryId::Currency, "Currency", false);
            self.loader.load_ordered_units(&category)
        }

        fn eur_ratio(&self) -> f64 {
            self.loader.load_ordered_ratios(&currency("USD"))[&currency("EUR")].ratio
        }
    }

    const STALE_RATIOS: &str = r#"[{"An":"USD","Rt":1},{"An":"EUR","Rt":0.5}]"#;

    fn currency(code: &str) -> Unit {
        Unit::new(UnitId::currency(code), "", code)
    }

    fn selected(units: &[Unit]) -> (Vec<String>, Vec<String>) {
        let sources = units
            .iter()
            .filter(|u| u.is_conversion_source)
            .map(|u| u.abbreviation.clone())
            .collect();
        let targets = units
            .iter()
            .filter(|u| u.is_conversion_target)
            .map(|u| u.abbreviation.clone())
            .collect();
        (sources, targets)
    }

    #[tokio::test]
    async fn test_cold_start_loads_from_web() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;

        assert!(h.loader.loaded_from_web());
        assert_eq!(h.currency_units().len(), 2);
        assert!((h.eur_ratio() - 0.920503).abs() < 1e-12);
        assert_eq!(h.callback.load_finished(), vec![true]);

        // The fresh payloads are persisted.
        assert_eq!(h.cache.read(STATIC_DATA_FILENAME).await.unwrap(), MockCurrencyClient::METADATA);
        assert_eq!(h.cache.read(ALL_RATIOS_DATA_FILENAME).await.unwrap(), MockCurrencyClient::RATIOS);
        assert!(h.settings.get_timestamp(CACHE_TIMESTAMP_KEY).await.is_some());
        assert_eq!(h.settings.get_string(CACHE_LANGCODE_KEY).await.as_deref(), Some("en-US"));
    }

    #[tokio::test]
    async fn test_web_payloads_fetched_concurrently() {
        let client = MockCurrencyClient::new();
        client.set_delay(std::time::Duration::from_millis(20));
        let h = Harness::new(client);

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_web());
        assert_eq!(h.client.call_count("metadata"), 1);
        assert_eq!(h.client.call_count("ratios"), 1);
        assert_eq!(h.client.max_concurrent_requests(), 2);
    }

    /// Every unit of a snapshot has a full ratio row and the selection is
    /// exactly one source and one target.
    fn assert_complete_snapshot(loader: &CurrencyLoader, units: &[Unit]) {
        assert_eq!(units.len(), 4, "partial unit list: {:?}", units);
        for unit in units {
            let row = loader.load_ordered_ratios(unit);
            assert_eq!(row.len(), units.len(), "partial ratio row for {}", unit.id);
            assert!(units.iter().all(|u| row.contains_key(u)));
        }
        let (sources, targets) = selected(units);
        assert_eq!(sources.len(), 1, "sources: {:?}", sources);
        assert_eq!(targets.len(), 1, "targets: {:?}", targets);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_partial_table() {
        let client = MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS);
        client.set_delay(std::time::Duration::from_millis(2));
        let h = Arc::new(Harness::new(client));
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let h = h.clone();
                let done = done.clone();
                tokio::spawn(async move {
                    let mut snapshots = 0usize;
                    loop {
                        let finished = done.load(Ordering::SeqCst);
                        let units = h.currency_units();
                        if !units.is_empty() {
                            assert_complete_snapshot(&h.loader, &units);
                        }
                        snapshots += 1;
                        if finished {
                            break snapshots;
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        h.loader.load_data().await;
        for _ in 0..20 {
            assert!(h.loader.try_load_data_from_web_override().await);
        }
        done.store(true, Ordering::SeqCst);

        for reader in readers {
            assert!(reader.await.unwrap() > 0);
        }
        assert_complete_snapshot(&h.loader, &h.currency_units());
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_web() {
        let h = Harness::new(MockCurrencyClient::new());
        h.seed_cache(Duration::hours(1), "en-US", STALE_RATIOS).await;

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_cache());
        assert_eq!(h.client.call_count("metadata"), 0);
        assert_eq!(h.eur_ratio(), 0.5);
        assert_eq!(h.callback.load_finished(), vec![true]);
    }

    #[tokio::test]
    async fn test_stale_cache_refreshes_from_web_first() {
        let h = Harness::new(MockCurrencyClient::new());
        h.seed_cache(Duration::hours(25), "en-US", STALE_RATIOS).await;

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_web());
        assert_eq!(h.client.call_count("metadata"), 1);
        assert_eq!(h.client.call_count("ratios"), 1);
        assert!((h.eur_ratio() - 0.920503).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_stale_cache_used_when_refresh_fails() {
        let h = Harness::new(MockCurrencyClient::failing());
        h.seed_cache(Duration::hours(25), "en-US", STALE_RATIOS).await;

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_cache());
        assert_eq!(h.client.call_count("metadata"), 1);
        assert_eq!(h.eur_ratio(), 0.5);
    }

    #[tokio::test]
    async fn test_stale_cache_offline_does_not_fetch() {
        let h = Harness::with_behavior(MockCurrencyClient::new(), NetworkAccessBehavior::Offline);
        h.seed_cache(Duration::days(8), "en-US", STALE_RATIOS).await;

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_cache());
        assert_eq!(h.client.call_count("metadata"), 0);
        assert!(h.loader.is_week_old());

        let events = h.callback.events();
        let timestamp = events.iter().find_map(|e| match e {
            Event::Timestamp(text, week_old) => Some((text.clone(), *week_old)),
            _ => None,
        });
        let (text, week_old) = timestamp.unwrap();
        assert!(text.starts_with("Updated "));
        assert!(week_old);
    }

    #[tokio::test]
    async fn test_language_mismatch_is_cache_miss() {
        let h = Harness::new(MockCurrencyClient::new());
        h.seed_cache(Duration::hours(1), "fr-FR", STALE_RATIOS).await;

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_web());
        assert_eq!(h.client.call_count("metadata"), 1);
    }

    #[tokio::test]
    async fn test_missing_cache_file_falls_back_to_web() {
        let h = Harness::new(MockCurrencyClient::new());
        h.seed_cache(Duration::hours(1), "en-US", STALE_RATIOS).await;
        h.cache.remove(ALL_RATIOS_DATA_FILENAME).await.unwrap();

        h.loader.load_data().await;

        assert!(h.loader.loaded_from_web());
    }

    #[tokio::test]
    async fn test_failed_load_reports_once() {
        let h = Harness::new(MockCurrencyClient::failing());
        h.loader.load_data().await;

        assert_eq!(h.loader.load_status(), CurrencyLoadStatus::FailedToLoad);
        assert!(h.currency_units().is_empty());
        assert_eq!(h.callback.load_finished(), vec![false]);
        assert_eq!(h.loader.get_currency_timestamp(), "");
        assert!(h.callback.events().contains(&Event::Timestamp(String::new(), false)));
    }

    #[tokio::test]
    async fn test_malformed_payload_fails_without_partial_data() {
        let h = Harness::new(MockCurrencyClient::with_payloads(MockCurrencyClient::METADATA, "{oops"));
        h.loader.load_data().await;

        assert_eq!(h.loader.load_status(), CurrencyLoadStatus::FailedToLoad);
        assert!(h.currency_units().is_empty());
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_missing_client_fails() {
        let loader = CurrencyLoader::new(
            CurrencyLoaderConfig::default(),
            CurrencyLoaderDeps {
                strings: Arc::new(ResourceStrings::en_us()),
                client: None,
                cache: Arc::new(MemoryCacheStore::new()),
                settings: Arc::new(MemorySettingsStore::new()),
                network: Arc::new(NetworkMonitor::default()),
            },
        )
        .unwrap();

        loader.load_data().await;
        assert_eq!(loader.load_status(), CurrencyLoadStatus::FailedToLoad);
    }

    #[tokio::test]
    async fn test_reload_after_success_skips_fetch() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;
        h.loader.load_data().await;

        assert_eq!(h.client.call_count("metadata"), 1);
        assert_eq!(h.callback.load_finished(), vec![true, true]);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let h = Harness::new(MockCurrencyClient::failing());
        h.loader.load_data().await;
        assert_eq!(h.loader.load_status(), CurrencyLoadStatus::FailedToLoad);

        h.client.set_failing(false);
        h.loader.load_data().await;
        assert!(h.loader.loaded_from_web());
        assert_eq!(h.callback.load_finished(), vec![false, true]);
    }

    #[tokio::test]
    async fn test_metered_requires_override() {
        let h = Harness::with_behavior(MockCurrencyClient::new(), NetworkAccessBehavior::OptIn);
        h.loader.load_data().await;

        assert_eq!(h.loader.load_status(), CurrencyLoadStatus::FailedToLoad);
        assert_eq!(h.client.call_count("metadata"), 0);

        assert!(h.loader.try_load_data_from_web_override().await);
        assert!(h.loader.loaded_from_web());
        assert_eq!(h.currency_units().len(), 2);
    }

    #[tokio::test]
    async fn test_offline_override_fails() {
        let h = Harness::with_behavior(MockCurrencyClient::new(), NetworkAccessBehavior::Offline);
        h.loader.load_data().await;

        assert!(!h.loader.try_load_data_from_web_override().await);
        assert_eq!(h.loader.load_status(), CurrencyLoadStatus::FailedToLoad);
        assert!(h.callback.events().contains(&Event::RefreshFailed));
        assert_eq!(h.client.call_count("metadata"), 0);
    }

    #[tokio::test]
    async fn test_network_changes_reach_callback() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;
        assert!(h.callback.events().contains(&Event::Network(NetworkAccessBehavior::Normal)));

        h.network.set(NetworkAccessBehavior::Offline);
        for _ in 0..100 {
            if h.loader.network_behavior() == NetworkAccessBehavior::Offline {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(h.loader.network_behavior(), NetworkAccessBehavior::Offline);
        assert!(h.callback.events().contains(&Event::Network(NetworkAccessBehavior::Offline)));
    }

    #[tokio::test]
    async fn test_default_selection_is_persisted() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;

        let (sources, targets) = selected(&h.currency_units());
        assert_eq!(sources, vec!["USD"]);
        assert_eq!(targets, vec!["EUR"]);
        assert_eq!(h.settings.get_string(CURRENCY_UNIT_FROM_KEY).await.as_deref(), Some("USD"));
        assert_eq!(h.settings.get_string(CURRENCY_UNIT_TO_KEY).await.as_deref(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_persisted_selection_takes_precedence() {
        let h = Harness::new(MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS));
        h.settings.set_string(CURRENCY_UNIT_FROM_KEY, "GBP").await.unwrap();
        h.settings.set_string(CURRENCY_UNIT_TO_KEY, "JPY").await.unwrap();

        h.loader.load_data().await;

        let (sources, targets) = selected(&h.currency_units());
        assert_eq!(sources, vec!["GBP"]);
        assert_eq!(targets, vec!["JPY"]);
    }

    #[tokio::test]
    async fn test_unknown_selection_falls_back() {
        let h = Harness::new(MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS));
        h.settings.set_string(CURRENCY_UNIT_FROM_KEY, "CHF").await.unwrap();
        h.settings.set_string(CURRENCY_UNIT_TO_KEY, "JPY").await.unwrap();

        h.loader.load_data().await;

        let (sources, targets) = selected(&h.currency_units());
        assert_eq!(sources, vec!["USD"]);
        assert_eq!(targets, vec!["EUR"]);
        assert_eq!(h.settings.get_string(CURRENCY_UNIT_FROM_KEY).await.as_deref(), Some("USD"));
    }

    #[tokio::test]
    async fn test_units_sorted_and_non_positive_dropped() {
        let h = Harness::new(MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS));
        h.loader.load_data().await;

        let units = h.currency_units();
        let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Europe - Euro", "Japan - Yen", "United Kingdom - Pound", "United States - Dollar"]
        );
        assert!(!units.contains(&currency("XXX")));
    }

    #[tokio::test]
    async fn test_ratios_pivot_through_source_currency() {
        let h = Harness::new(MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS));
        h.loader.load_data().await;

        let from_gbp = h.loader.load_ordered_ratios(&currency("GBP"));
        assert_eq!(from_gbp.len(), 4);
        assert!((from_gbp[&currency("JPY")].ratio - 151.2 / 0.79).abs() < 1e-9);
        assert_eq!(from_gbp[&currency("GBP")].ratio, 1.0);
    }

    #[tokio::test]
    async fn test_ratio_equality_truncates() {
        let h = Harness::new(MockCurrencyClient::with_payloads(FOUR_METADATA, FOUR_RATIOS));
        h.loader.load_data().await;

        let units = h.currency_units();
        let usd = units.iter().find(|u| u.abbreviation == "USD").unwrap();
        let eur = units.iter().find(|u| u.abbreviation == "EUR").unwrap();

        let (display, accessible) = h.loader.get_currency_ratio_equality(usd, eur);
        assert_eq!(display, "1 USD = 0.9123 EUR");
        assert_eq!(accessible, "1 United States Dollar = 0.9123 Europe Euro");
    }

    #[tokio::test]
    async fn test_ratio_equality_sample_payload() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;

        let units = h.currency_units();
        let (display, accessible) = h.loader.get_currency_ratio_equality(&units[1], &units[0]);
        assert_eq!(display, "1 USD = 0.9205 EUR");
        assert_eq!(accessible, "1 United States Dollar = 0.9205 Europe Euro");
    }

    #[tokio::test]
    async fn test_unknown_units_give_empty_results() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;

        let empty = (String::new(), String::new());
        assert_eq!(h.loader.get_currency_ratio_equality(&currency("USD"), &currency("XYZ")), empty);
        assert_eq!(h.loader.get_currency_symbols(&currency("USD"), &currency("XYZ")), empty);
    }

    #[tokio::test]
    async fn test_currency_symbols() {
        let h = Harness::new(MockCurrencyClient::new());
        h.loader.load_data().await;

        assert_eq!(
            h.loader.get_currency_symbols(&currency("USD"), &currency("EUR")),
            ("$".to_string(), "€".to_string())
        );
    }

    #[tokio::test]
    async fn test_supports_only_currency() {
        let h = Harness::new(MockCurrencyClient::new());
        let length = Category::new(CategoryId::Length, "Length", false);

        assert!(!h.loader.supports_category(&length));
        assert!(h.loader.load_ordered_units(&length).is_empty());

        let categories = h.loader.load_ordered_categories();
        assert_eq!(categories.len(), 1);
        assert!(h.loader.supports_category(&categories[0]));
    }

    #[tokio::test]
    async fn test_rtl_names() {
        let client = Arc::new(MockCurrencyClient::new());
        let loader = CurrencyLoader::new(
            CurrencyLoaderConfig::default().with_language("ar-SA"),
            CurrencyLoaderDeps {
                strings: Arc::new(ResourceStrings::en_us()),
                client: Some(client as Arc<dyn CurrencyHttpClient>),
                cache: Arc::new(MemoryCacheStore::new()),
                settings: Arc::new(MemorySettingsStore::new()),
                network: Arc::new(NetworkMonitor::default()),
            },
        )
        .unwrap();

        loader.load_data().await;

        let category = Category::new(CategoryId::Currency, "Currency", false);
        let units = loader.load_ordered_units(&category);
        assert!(units.iter().all(|u| u.is_rtl_name));
        assert!(units.iter().any(|u| u.name == "Dollar - United States"));
    }
}
