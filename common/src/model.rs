//! Categories, units and conversion data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::identifiers::{CategoryId, CurrencyCode, StaticUnit, UnitId};

/// A measurement domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category identity.
    pub id: CategoryId,
    /// Localized category name.
    pub name: String,
    /// Whether the category accepts negative input values.
    pub supports_negative: bool,
}

impl Category {
    /// Create a new category.
    pub fn new(id: CategoryId, name: impl Into<String>, supports_negative: bool) -> Self {
        Self {
            id,
            name: name.into(),
            supports_negative,
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A named measurement unit within a category.
///
/// Equality and hashing only consider `id`; names are locale dependent and
/// must not affect map lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// Name variant read by screen readers.
    pub accessible_name: String,
    pub abbreviation: String,
    pub is_rtl_name: bool,
    pub is_conversion_source: bool,
    pub is_conversion_target: bool,
    pub is_whimsical: bool,
}

impl Unit {
    /// Create a unit with no selection flags.
    pub fn new(id: impl Into<UnitId>, name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            accessible_name: name.clone(),
            name,
            abbreviation: abbreviation.into(),
            is_rtl_name: false,
            is_conversion_source: false,
            is_conversion_target: false,
            is_whimsical: false,
        }
    }

    /// Create a currency unit.
    ///
    /// The display name joins country and currency name with `" - "`; for
    /// right-to-left languages the currency name comes first.
    pub fn currency(
        code: CurrencyCode,
        currency_name: &str,
        country_name: &str,
        is_rtl: bool,
        is_conversion_source: bool,
        is_conversion_target: bool,
    ) -> Self {
        let (first, second) = if is_rtl {
            (currency_name, country_name)
        } else {
            (country_name, currency_name)
        };

        Self {
            abbreviation: code.as_str().to_string(),
            id: UnitId::Currency(code),
            name: format!("{} - {}", first, second),
            accessible_name: format!("{} {}", first, second),
            is_rtl_name: is_rtl,
            is_conversion_source,
            is_conversion_target,
            is_whimsical: false,
        }
    }

    /// Mark as the default conversion source.
    pub fn with_source(mut self, is_source: bool) -> Self {
        self.is_conversion_source = is_source;
        self
    }

    /// Mark as the default conversion target.
    pub fn with_target(mut self, is_target: bool) -> Self {
        self.is_conversion_target = is_target;
        self
    }

    /// Mark as a whimsical (fun comparison) unit.
    pub fn whimsical(mut self) -> Self {
        self.is_whimsical = true;
        self
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.abbreviation)
    }
}

/// A unit together with its display position.
#[derive(Debug, Clone)]
pub struct OrderedUnit {
    pub unit: Unit,
    pub order: i32,
}

impl OrderedUnit {
    pub fn new(unit: Unit, order: i32) -> Self {
        Self { unit, order }
    }
}

/// Ratio and offset needed to convert a value from one unit into another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionData {
    pub ratio: f64,
    pub offset: f64,
    /// Apply the offset before scaling.
    pub offset_first: bool,
}

impl ConversionData {
    /// Create conversion data.
    pub fn new(ratio: f64, offset: f64, offset_first: bool) -> Self {
        Self {
            ratio,
            offset,
            offset_first,
        }
    }

    /// A purely multiplicative conversion.
    pub fn linear(ratio: f64) -> Self {
        Self::new(ratio, 0.0, false)
    }

    /// The identity conversion.
    pub fn identity() -> Self {
        Self::linear(1.0)
    }

    /// Convert a value.
    pub fn convert(&self, value: f64) -> f64 {
        if self.offset_first {
            (value + self.offset) * self.ratio
        } else {
            value * self.ratio + self.offset
        }
    }
}

/// Manually enumerated conversion between two units of a non-linear category.
#[derive(Debug, Clone, Copy)]
pub struct ExplicitConversionData {
    pub category: CategoryId,
    pub parent: StaticUnit,
    pub unit: StaticUnit,
    pub data: ConversionData,
}

impl ExplicitConversionData {
    pub fn new(category: CategoryId, parent: StaticUnit, unit: StaticUnit, data: ConversionData) -> Self {
        Self {
            category,
            parent,
            unit,
            data,
        }
    }
}

/// One record of the currency metadata payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrencyStaticData {
    pub country_code: String,
    pub country_name: String,
    pub currency_code: String,
    pub currency_name: String,
    pub currency_symbol: String,
}

/// Raw exchange ratio of a currency relative to the source currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRatio {
    pub ratio: f64,
    pub source_currency_code: String,
    pub target_currency_code: String,
}

/// Currency-only per-unit metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyUnitMetadata {
    pub symbol: String,
}

impl CurrencyUnitMetadata {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }
}
