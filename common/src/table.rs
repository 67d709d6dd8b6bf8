//! The category/unit/ratio lookup table.

use std::collections::HashMap;

use crate::error::{ConvDataError, Result};
use crate::identifiers::CategoryId;
use crate::model::{Category, ConversionData, Unit};

/// Ratios from one unit to every unit reachable from it.
pub type UnitRatios = HashMap<Unit, ConversionData>;

/// Category → ordered units, and unit → (unit → conversion data).
///
/// Invariant: every unit appearing in the ratio map belongs to the unit list
/// of some category in the table.
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    categories: Vec<Category>,
    units: HashMap<CategoryId, Vec<Unit>>,
    ratios: HashMap<Unit, UnitRatios>,
}

impl ConversionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category, keeping insertion order as display order.
    pub fn push_category(&mut self, category: Category) {
        if !self.categories.contains(&category) {
            self.units.entry(category.id).or_default();
            self.categories.push(category);
        }
    }

    /// Set the ordered unit list of a category.
    pub fn set_units(&mut self, category: CategoryId, units: Vec<Unit>) {
        self.units.insert(category, units);
    }

    /// Set the ratios from `unit` to every other unit.
    pub fn insert_ratios(&mut self, unit: Unit, ratios: UnitRatios) {
        self.ratios.insert(unit, ratios);
    }

    /// Replace a category's units and ratios wholesale.
    pub fn replace_category(&mut self, category: CategoryId, units: Vec<Unit>, ratios: HashMap<Unit, UnitRatios>) {
        if let Some(previous) = self.units.insert(category, units) {
            for unit in &previous {
                self.ratios.remove(unit);
            }
        }
        self.ratios.extend(ratios);
    }

    /// Remove every unit and ratio of a category, keeping the category itself.
    pub fn clear_category(&mut self, category: CategoryId) {
        self.replace_category(category, Vec::new(), HashMap::new());
    }

    /// Ordered categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Check if the table knows a category.
    pub fn contains_category(&self, category: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == category)
    }

    /// Ordered units of a category.
    pub fn units(&self, category: CategoryId) -> Option<&[Unit]> {
        self.units.get(&category).map(|u| u.as_slice())
    }

    /// Ratios from a unit.
    pub fn ratios(&self, unit: &Unit) -> Option<&UnitRatios> {
        self.ratios.get(unit)
    }

    /// Conversion data for a single pair.
    pub fn ratio(&self, from: &Unit, to: &Unit) -> Option<ConversionData> {
        self.ratios.get(from).and_then(|r| r.get(to)).copied()
    }

    /// Convert a value between two units.
    pub fn convert(&self, value: f64, from: &Unit, to: &Unit) -> Option<f64> {
        self.ratio(from, to).map(|data| data.convert(value))
    }

    /// Find a unit of a category by abbreviation.
    ///
    /// Exact matches win over case-insensitive ones, since abbreviations such
    /// as `Mb` and `MB` only differ by case.
    pub fn find_unit(&self, category: CategoryId, abbreviation: &str) -> Option<&Unit> {
        let units = self.units(category)?;
        units
            .iter()
            .find(|u| u.abbreviation == abbreviation)
            .or_else(|| units.iter().find(|u| u.abbreviation.eq_ignore_ascii_case(abbreviation)))
    }

    /// Number of units across all categories.
    pub fn unit_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    /// Check if the table holds no units.
    pub fn is_empty(&self) -> bool {
        self.unit_count() == 0
    }

    /// Verify that every unit in the ratio map is listed under a category.
    pub fn check_consistency(&self) -> Result<()> {
        let listed = |unit: &Unit| self.units.values().any(|units| units.contains(unit));

        for (from, targets) in &self.ratios {
            if !listed(from) {
                return Err(ConvDataError::OrphanUnit(from.id.clone()));
            }
            if let Some(orphan) = targets.keys().find(|u| !listed(u)) {
                return Err(ConvDataError::OrphanUnit(orphan.id.clone()));
            }
        }

        Ok(())
    }
}
