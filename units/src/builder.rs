//! Static conversion graph construction.

use std::collections::HashMap;

use convdata_common::table::UnitRatios;
use convdata_common::{
    Category, CategoryId, ConversionData, ConversionTable, ExplicitConversionData, OrderedUnit, StaticUnit,
    StringProvider, Unit, UnitId,
};
use tracing::debug;

use crate::data::{self, UnitSpec};
use crate::region::RegionPreferences;

/// Builds the conversion table for every non-currency category.
///
/// The Currency category is registered with an empty unit list; its units
/// are installed later by the currency loader.
pub struct StaticGraphBuilder<'a> {
    strings: &'a dyn StringProvider,
    region: RegionPreferences,
}

impl<'a> StaticGraphBuilder<'a> {
    /// Create a builder resolving names through `strings`.
    pub fn new(strings: &'a dyn StringProvider, region: RegionPreferences) -> Self {
        Self { strings, region }
    }

    /// Build the table.
    ///
    /// # Panics
    ///
    /// Panics if the hard-coded tables contain a non-positive base factor, a
    /// catalogued linear unit without a factor, or an explicit conversion
    /// naming a unit that is not offered.
    pub fn build(&self) -> ConversionTable {
        let explicit = data::explicit_conversions();
        let mut table = ConversionTable::new();

        for id in CategoryId::ALL {
            table.push_category(self.category(id));
            if id == CategoryId::Currency {
                continue;
            }

            let units = self.ordered_units(id);
            let ratios = if explicit.iter().any(|e| e.category == id) {
                explicit_ratios(id, &units, &explicit)
            } else {
                linear_ratios(id, &units, data::BASE_FACTORS)
            };

            table.replace_category(id, units, ratios);
        }

        debug!(
            region = %self.region.region_code,
            categories = table.categories().len(),
            units = table.unit_count(),
            "Built static conversion graph"
        );

        table
    }

    fn category(&self, id: CategoryId) -> Category {
        let name = self.strings.localized(&format!("CategoryName_{}", id.resource_key()));
        Category::new(id, name, id.supports_negative())
    }

    /// Offered units of a category, sorted by display order.
    fn ordered_units(&self, id: CategoryId) -> Vec<Unit> {
        let mut ordered: Vec<OrderedUnit> = data::units_of(id)
            .iter()
            .filter(|spec| spec.is_available(&self.region))
            .map(|spec| OrderedUnit::new(self.unit(spec), spec.order))
            .collect();

        ordered.sort_by_key(|u| u.order);
        ordered.into_iter().map(|u| u.unit).collect()
    }

    fn unit(&self, spec: &UnitSpec) -> Unit {
        let name = self.strings.localized(&format!("UnitName_{}", spec.key));
        let abbreviation = self.strings.localized(&format!("UnitAbbreviation_{}", spec.key));
        let (is_source, is_target) = spec.selection.flags(&self.region);

        let unit = Unit::new(spec.unit, name, abbreviation)
            .with_source(is_source)
            .with_target(is_target);

        if spec.whimsical {
            unit.whimsical()
        } else {
            unit
        }
    }
}

/// `ratio(a→b) = f(a) / f(b)` for every ordered pair of offered units.
///
/// Factors of units that are not offered are ignored.
///
/// # Panics
///
/// Panics if an offered unit has no factor in `base_factors`, or a
/// non-positive one.
fn linear_ratios(
    id: CategoryId,
    units: &[Unit],
    base_factors: &[(CategoryId, StaticUnit, f64)],
) -> HashMap<Unit, UnitRatios> {
    let factors: HashMap<StaticUnit, f64> = base_factors
        .iter()
        .filter(|(category, _, _)| *category == id)
        .map(|(_, unit, factor)| (*unit, *factor))
        .collect();

    let factor_of = |unit: &Unit| -> f64 {
        let factor = match unit.id {
            UnitId::Static(fixed) => factors.get(&fixed).copied(),
            UnitId::Currency(_) => None,
        };
        match factor {
            Some(f) if f > 0.0 => f,
            Some(f) => panic!("non-positive base factor {} for unit {}", f, unit.id),
            None => panic!("no base factor for unit {} in category {}", unit.id, id),
        }
    };

    units
        .iter()
        .map(|from| {
            let from_factor = factor_of(from);
            let ratios = units
                .iter()
                .map(|to| (to.clone(), ConversionData::linear(from_factor / factor_of(to))))
                .collect();
            (from.clone(), ratios)
        })
        .collect()
}

fn explicit_ratios(id: CategoryId, units: &[Unit], explicit: &[ExplicitConversionData]) -> HashMap<Unit, UnitRatios> {
    let find = |fixed: StaticUnit| -> Unit {
        units
            .iter()
            .find(|u| u.id == UnitId::Static(fixed))
            .cloned()
            .unwrap_or_else(|| panic!("explicit conversion names {:?}, which is not offered in {}", fixed, id))
    };

    let mut ratios: HashMap<Unit, UnitRatios> = HashMap::new();
    for entry in explicit.iter().filter(|e| e.category == id) {
        ratios
            .entry(find(entry.parent))
            .or_default()
            .insert(find(entry.unit), entry.data);
    }
    ratios
}

#[cfg(test)]
mod tests {
    use super::*;
    use convdata_common::ResourceStrings;
    use proptest::prelude::*;
    use proptest::sample::Index;

    const LINEAR: [CategoryId; 11] = [
        CategoryId::Volume,
        CategoryId::Length,
        CategoryId::Weight,
        CategoryId::Energy,
        CategoryId::Area,
        CategoryId::Speed,
        CategoryId::Time,
        CategoryId::Power,
        CategoryId::Data,
        CategoryId::Pressure,
        CategoryId::Angle,
    ];

    fn build(region: &str) -> ConversionTable {
        let strings = ResourceStrings::en_us();
        StaticGraphBuilder::new(&strings, RegionPreferences::for_region(region)).build()
    }

    fn unit(table: &ConversionTable, category: CategoryId, abbreviation: &str) -> Unit {
        table.find_unit(category, abbreviation).cloned().unwrap()
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_categories_in_display_order() {
        let table = build("US");
        let ids: Vec<CategoryId> = table.categories().iter().map(|c| c.id).collect();

        assert_eq!(ids, CategoryId::ALL.to_vec());
        assert_eq!(table.categories()[0].name, "Currency");
        assert!(table.units(CategoryId::Currency).unwrap().is_empty());
    }

    #[test]
    fn test_units_sorted_by_order() {
        let table = build("US");
        let lengths: Vec<&str> = table
            .units(CategoryId::Length)
            .unwrap()
            .iter()
            .map(|u| u.abbreviation.as_str())
            .take(6)
            .collect();

        assert_eq!(lengths, vec!["Å", "nm", "µm", "mm", "cm", "m"]);
    }

    #[test]
    fn test_temperature_conversions() {
        let table = build("US");
        let c = unit(&table, CategoryId::Temperature, "°C");
        let f = unit(&table, CategoryId::Temperature, "°F");
        let k = unit(&table, CategoryId::Temperature, "K");

        assert!(approx_eq(table.convert(0.0, &c, &f).unwrap(), 32.0));
        assert!(approx_eq(table.convert(100.0, &c, &f).unwrap(), 212.0));
        assert!(approx_eq(table.convert(0.0, &c, &k).unwrap(), 273.15));
        assert!(approx_eq(table.convert(212.0, &f, &c).unwrap(), 100.0));
        assert!(approx_eq(table.convert(0.0, &k, &f).unwrap(), -459.67));
        assert!(approx_eq(table.convert(32.0, &f, &k).unwrap(), 273.15));
        assert_eq!(table.ratios(&c).unwrap().len(), 3);
    }

    #[test]
    fn test_linear_conversions() {
        let table = build("US");
        let ft = unit(&table, CategoryId::Length, "ft");
        let m = unit(&table, CategoryId::Length, "m");
        let gb = unit(&table, CategoryId::Data, "GB");
        let mb_bits = unit(&table, CategoryId::Data, "Mb");

        assert!(approx_eq(table.convert(10.0, &ft, &m).unwrap(), 3.048));
        assert!(approx_eq(table.convert(1.0, &gb, &mb_bits).unwrap(), 8000.0));
    }

    #[test]
    fn test_one_source_and_target_per_category() {
        for region in ["US", "GB", "FR", "KR", "LR", "KY", "JP"] {
            let table = build(region);
            for id in LINEAR.iter().chain([CategoryId::Temperature].iter()) {
                let units = table.units(*id).unwrap();
                let sources = units.iter().filter(|u| u.is_conversion_source).count();
                let targets = units.iter().filter(|u| u.is_conversion_target).count();
                assert_eq!(sources, 1, "{} sources in {} for {}", sources, id, region);
                assert_eq!(targets, 1, "{} targets in {} for {}", targets, id, region);
            }
        }
    }

    #[test]
    fn test_region_defaults() {
        let us = build("US");
        let fahrenheit = unit(&us, CategoryId::Temperature, "°F");
        assert!(fahrenheit.is_conversion_target);

        let gb = build("GB");
        let watt = unit(&gb, CategoryId::Power, "W");
        assert!(watt.is_conversion_source);
        let liter_target = gb
            .units(CategoryId::Volume)
            .unwrap()
            .iter()
            .find(|u| u.is_conversion_target)
            .unwrap();
        assert_eq!(liter_target.abbreviation, "mL");
    }

    #[test]
    fn test_pyeong_is_regional() {
        let pyeong = Unit::new(StaticUnit::AreaPyeong, "", "");

        let kr = build("KR");
        assert!(kr.units(CategoryId::Area).unwrap().contains(&pyeong));

        let us = build("US");
        assert!(!us.units(CategoryId::Area).unwrap().contains(&pyeong));
        assert!(us.ratios(&pyeong).is_none());
        let sq_m = unit(&us, CategoryId::Area, "m²");
        assert!(!us.ratios(&sq_m).unwrap().contains_key(&pyeong));
    }

    #[test]
    fn test_table_is_consistent() {
        for region in ["US", "KR", "DE"] {
            assert!(build(region).check_consistency().is_ok());
        }
    }

    #[test]
    fn test_missing_strings_fall_back_to_keys() {
        let strings = ResourceStrings::new();
        let table = StaticGraphBuilder::new(&strings, RegionPreferences::for_region("US")).build();

        let meter = table.find_unit(CategoryId::Length, "UnitAbbreviation_Meter").unwrap();
        assert_eq!(meter.name, "UnitName_Meter");
    }

    fn length_units() -> Vec<Unit> {
        vec![
            Unit::new(StaticUnit::LengthMeter, "Meter", "m"),
            Unit::new(StaticUnit::LengthFoot, "Foot", "ft"),
        ]
    }

    #[test]
    fn test_linear_ratios_from_supplied_factors() {
        let factors = [
            (CategoryId::Length, StaticUnit::LengthMeter, 1.0),
            (CategoryId::Length, StaticUnit::LengthFoot, 0.3048),
            // Other categories and units that are not offered are ignored.
            (CategoryId::Weight, StaticUnit::LengthFoot, 0.0),
            (CategoryId::Length, StaticUnit::LengthMile, 0.0),
        ];
        let units = length_units();
        let ratios = linear_ratios(CategoryId::Length, &units, &factors);

        assert_eq!(ratios.len(), 2);
        let meter_to_foot = ratios[&units[0]][&units[1]].ratio;
        assert!(approx_eq(meter_to_foot, 1.0 / 0.3048));
    }

    #[test]
    #[should_panic(expected = "non-positive base factor")]
    fn test_zero_base_factor_panics() {
        let factors = [
            (CategoryId::Length, StaticUnit::LengthMeter, 1.0),
            (CategoryId::Length, StaticUnit::LengthFoot, 0.0),
        ];
        linear_ratios(CategoryId::Length, &length_units(), &factors);
    }

    #[test]
    #[should_panic(expected = "non-positive base factor")]
    fn test_negative_base_factor_panics() {
        let factors = [
            (CategoryId::Length, StaticUnit::LengthMeter, -1.0),
            (CategoryId::Length, StaticUnit::LengthFoot, 0.3048),
        ];
        linear_ratios(CategoryId::Length, &length_units(), &factors);
    }

    #[test]
    #[should_panic(expected = "no base factor")]
    fn test_missing_base_factor_panics() {
        let factors = [(CategoryId::Length, StaticUnit::LengthMeter, 1.0)];
        linear_ratios(CategoryId::Length, &length_units(), &factors);
    }

    #[test]
    #[should_panic(expected = "no base factor")]
    fn test_factor_from_another_category_panics() {
        let factors = [
            (CategoryId::Length, StaticUnit::LengthMeter, 1.0),
            (CategoryId::Area, StaticUnit::LengthFoot, 0.3048),
        ];
        linear_ratios(CategoryId::Length, &length_units(), &factors);
    }

    fn pick(table: &ConversionTable, id: CategoryId, index: &Index) -> Unit {
        let units = table.units(id).unwrap();
        units[index.index(units.len())].clone()
    }

    proptest! {
        #[test]
        fn prop_linear_ratios_are_reflexive_and_symmetric(
            category in prop::sample::select(LINEAR.to_vec()),
            a in any::<Index>(),
            b in any::<Index>(),
        ) {
            let table = build("US");
            let a = pick(&table, category, &a);
            let b = pick(&table, category, &b);

            let aa = table.ratio(&a, &a).unwrap();
            prop_assert_eq!(aa.ratio, 1.0);

            let ab = table.ratio(&a, &b).unwrap().ratio;
            let ba = table.ratio(&b, &a).unwrap().ratio;
            prop_assert!(approx_eq(ab * ba, 1.0), "{} * {} != 1", ab, ba);
        }

        #[test]
        fn prop_linear_ratios_are_transitive(
            category in prop::sample::select(LINEAR.to_vec()),
            a in any::<Index>(),
            b in any::<Index>(),
            c in any::<Index>(),
        ) {
            let table = build("US");
            let a = pick(&table, category, &a);
            let b = pick(&table, category, &b);
            let c = pick(&table, category, &c);

            let ab = table.ratio(&a, &b).unwrap().ratio;
            let bc = table.ratio(&b, &c).unwrap().ratio;
            let ac = table.ratio(&a, &c).unwrap().ratio;
            prop_assert!(approx_eq(ab * bc, ac), "{} * {} != {}", ab, bc, ac);
        }
    }
}
