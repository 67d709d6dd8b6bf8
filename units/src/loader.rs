//! Data loader over the static conversion graph.

use std::sync::Arc;

use async_trait::async_trait;
use convdata_common::table::UnitRatios;
use convdata_common::{Category, CategoryId, ConversionTable, ConverterDataLoader, StringProvider, Unit};
use parking_lot::RwLock;
use tracing::info;

use crate::builder::StaticGraphBuilder;
use crate::region::RegionPreferences;

/// Serves every non-currency category from a table built at construction.
pub struct StaticDataLoader {
    strings: Arc<dyn StringProvider>,
    region: RegionPreferences,
    table: RwLock<ConversionTable>,
}

impl StaticDataLoader {
    /// Build the static graph synchronously and wrap it in a loader.
    pub fn new(strings: Arc<dyn StringProvider>, region: RegionPreferences) -> Self {
        let table = StaticGraphBuilder::new(strings.as_ref(), region.clone()).build();
        Self {
            strings,
            region,
            table: RwLock::new(table),
        }
    }

    /// Rebuild the graph, picking up changed resource strings.
    ///
    /// Only needed after a locale change; the graph built by [`Self::new`]
    /// is otherwise never replaced.
    pub fn rebuild(&self) {
        let table = StaticGraphBuilder::new(self.strings.as_ref(), self.region.clone()).build();
        *self.table.write() = table;
        info!(region = %self.region.region_code, "Static unit data rebuilt");
    }

    /// Region the graph was built for.
    pub fn region(&self) -> &RegionPreferences {
        &self.region
    }

    /// Find a unit of a category by abbreviation.
    pub fn find_unit(&self, category: CategoryId, abbreviation: &str) -> Option<Unit> {
        self.table.read().find_unit(category, abbreviation).cloned()
    }
}

#[async_trait]
impl ConverterDataLoader for StaticDataLoader {
    /// The graph is built in [`StaticDataLoader::new`], so there is nothing
    /// left to load.
    async fn load_data(&self) {
        let (categories, units) = {
            let table = self.table.read();
            (table.categories().len(), table.unit_count())
        };
        info!(region = %self.region.region_code, categories, units, "Static unit data loaded");
    }

    fn load_ordered_categories(&self) -> Vec<Category> {
        self.table.read().categories().to_vec()
    }

    fn load_ordered_units(&self, category: &Category) -> Vec<Unit> {
        self.table
            .read()
            .units(category.id)
            .map(|units| units.to_vec())
            .unwrap_or_default()
    }

    fn load_ordered_ratios(&self, unit: &Unit) -> UnitRatios {
        self.table.read().ratios(unit).cloned().unwrap_or_default()
    }

    fn supports_category(&self, category: &Category) -> bool {
        category.id != CategoryId::Currency && self.table.read().contains_category(category.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convdata_common::{ResourceStrings, StaticUnit, StringProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loader() -> StaticDataLoader {
        StaticDataLoader::new(Arc::new(ResourceStrings::en_us()), RegionPreferences::for_region("US"))
    }

    #[test]
    fn test_supports_every_category_but_currency() {
        let loader = loader();
        let categories = loader.load_ordered_categories();
        assert_eq!(categories.len(), CategoryId::ALL.len());

        for category in &categories {
            assert_eq!(loader.supports_category(category), category.id != CategoryId::Currency);
        }
    }

    #[test]
    fn test_units_and_ratios() {
        let loader = loader();
        let length = Category::new(CategoryId::Length, "Length", false);
        let units = loader.load_ordered_units(&length);
        assert_eq!(units.len(), 15);

        let meter = Unit::new(StaticUnit::LengthMeter, "", "");
        let ratios = loader.load_ordered_ratios(&meter);
        assert_eq!(ratios.len(), units.len());
    }

    #[test]
    fn test_unknown_unit_has_no_ratios() {
        let loader = loader();
        let pyeong = Unit::new(StaticUnit::AreaPyeong, "", "");
        assert!(loader.load_ordered_ratios(&pyeong).is_empty());
    }

    /// Counts lookups so tests can tell whether the graph was rebuilt.
    struct CountingStrings {
        inner: ResourceStrings,
        lookups: AtomicUsize,
    }

    impl StringProvider for CountingStrings {
        fn get_string(&self, key: &str) -> Option<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_string(key)
        }
    }

    fn counting_loader() -> (Arc<CountingStrings>, StaticDataLoader) {
        let strings = Arc::new(CountingStrings {
            inner: ResourceStrings::en_us(),
            lookups: AtomicUsize::new(0),
        });
        let loader = StaticDataLoader::new(strings.clone(), RegionPreferences::for_region("US"));
        (strings, loader)
    }

    #[tokio::test]
    async fn test_load_data_does_not_rebuild() {
        let (strings, loader) = counting_loader();
        let built = strings.lookups.load(Ordering::SeqCst);
        assert!(built > 0);

        loader.load_data().await;
        loader.load_data().await;

        assert_eq!(strings.lookups.load(Ordering::SeqCst), built);
        assert!(loader.find_unit(CategoryId::Temperature, "°F").is_some());
    }

    #[test]
    fn test_rebuild_resolves_strings_again() {
        let (strings, loader) = counting_loader();
        let built = strings.lookups.load(Ordering::SeqCst);

        loader.rebuild();

        assert_eq!(strings.lookups.load(Ordering::SeqCst), 2 * built);
        assert!(loader.find_unit(CategoryId::Temperature, "°F").is_some());
    }
}
