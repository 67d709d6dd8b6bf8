//! Identifier types for categories and units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a measurement category.
///
/// The discriminants are the serialized category ids shared with the UI
/// layer; `Currency` is reserved for the asynchronously loaded category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum CategoryId {
    Volume = 4,
    Length = 5,
    Weight = 6,
    Temperature = 7,
    Energy = 8,
    Area = 9,
    Speed = 10,
    Time = 11,
    Power = 12,
    Data = 13,
    Pressure = 14,
    Angle = 15,
    Currency = 16,
}

impl CategoryId {
    /// All converter categories in display order.
    pub const ALL: [CategoryId; 13] = [
        CategoryId::Currency,
        CategoryId::Volume,
        CategoryId::Length,
        CategoryId::Weight,
        CategoryId::Temperature,
        CategoryId::Energy,
        CategoryId::Area,
        CategoryId::Speed,
        CategoryId::Time,
        CategoryId::Power,
        CategoryId::Data,
        CategoryId::Pressure,
        CategoryId::Angle,
    ];

    /// Get the serialized integer id.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Look up a category by its serialized id.
    pub fn from_i32(id: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_i32() == id)
    }

    /// Resource key suffix for the localized category name.
    pub fn resource_key(&self) -> &'static str {
        match self {
            CategoryId::Volume => "Volume",
            CategoryId::Length => "Length",
            CategoryId::Weight => "Weight",
            CategoryId::Temperature => "Temperature",
            CategoryId::Energy => "Energy",
            CategoryId::Area => "Area",
            CategoryId::Speed => "Speed",
            CategoryId::Time => "Time",
            CategoryId::Power => "Power",
            CategoryId::Data => "Data",
            CategoryId::Pressure => "Pressure",
            CategoryId::Angle => "Angle",
            CategoryId::Currency => "Currency",
        }
    }

    /// Whether values in this category may be negative.
    pub fn supports_negative(&self) -> bool {
        matches!(self, CategoryId::Temperature)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource_key())
    }
}

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a new currency code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic shape check: three ASCII uppercase letters.
    pub fn is_valid(&self) -> bool {
        self.0.len() == 3 && self.0.chars().all(|c| c.is_ascii_uppercase())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Fixed units of the statically built categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StaticUnit {
    AreaAcre,
    AreaHectare,
    AreaSquareCentimeter,
    AreaSquareFoot,
    AreaSquareInch,
    AreaSquareKilometer,
    AreaSquareMeter,
    AreaSquareMile,
    AreaSquareMillimeter,
    AreaSquareYard,
    AreaHand,
    AreaPaper,
    AreaSoccerField,
    AreaCastle,
    AreaPyeong,

    DataBit,
    DataNibble,
    DataByte,
    DataKilobit,
    DataKilobyte,
    DataKibibits,
    DataKibibytes,
    DataMegabit,
    DataMegabyte,
    DataMebibits,
    DataMebibytes,
    DataGigabit,
    DataGigabyte,
    DataGibibits,
    DataGibibytes,
    DataTerabit,
    DataTerabyte,
    DataTebibits,
    DataTebibytes,
    DataPetabit,
    DataPetabyte,
    DataPebibits,
    DataPebibytes,
    DataExabits,
    DataExabytes,
    DataExbibits,
    DataExbibytes,
    DataZetabits,
    DataZetabytes,
    DataZebibits,
    DataZebibytes,
    DataYottabit,
    DataYottabyte,
    DataYobibits,
    DataYobibytes,
    DataFloppyDisk,
    DataCD,
    DataDVD,

    EnergyCalorie,
    EnergyKilocalorie,
    EnergyBritishThermalUnit,
    EnergyKilojoule,
    EnergyKilowatthour,
    EnergyElectronVolt,
    EnergyJoule,
    EnergyFootPound,
    EnergyBattery,
    EnergyBanana,
    EnergySliceOfCake,

    LengthInch,
    LengthFoot,
    LengthYard,
    LengthMile,
    LengthMicron,
    LengthMillimeter,
    LengthNanometer,
    LengthAngstrom,
    LengthCentimeter,
    LengthMeter,
    LengthKilometer,
    LengthNauticalMile,
    LengthPaperclip,
    LengthHand,
    LengthJumboJet,

    PowerBritishThermalUnitPerMinute,
    PowerFootPoundPerMinute,
    PowerWatt,
    PowerKilowatt,
    PowerHorsepower,
    PowerLightBulb,
    PowerHorse,
    PowerTrainEngine,

    TemperatureDegreesCelsius,
    TemperatureDegreesFahrenheit,
    TemperatureKelvin,

    TimeDay,
    TimeSecond,
    TimeWeek,
    TimeYear,
    TimeMillisecond,
    TimeMicrosecond,
    TimeMinute,
    TimeHour,

    VolumeCupUS,
    VolumePintUS,
    VolumePintUK,
    VolumeQuartUS,
    VolumeQuartUK,
    VolumeGallonUS,
    VolumeGallonUK,
    VolumeLiter,
    VolumeTeaspoonUS,
    VolumeTablespoonUS,
    VolumeCubicCentimeter,
    VolumeCubicYard,
    VolumeCubicMeter,
    VolumeMilliliter,
    VolumeCubicInch,
    VolumeCubicFoot,
    VolumeFluidOunceUS,
    VolumeFluidOunceUK,
    VolumeTeaspoonUK,
    VolumeTablespoonUK,
    VolumeCoffeeCup,
    VolumeBathtub,
    VolumeSwimmingPool,

    WeightKilogram,
    WeightHectogram,
    WeightDecagram,
    WeightGram,
    WeightPound,
    WeightOunce,
    WeightMilligram,
    WeightCentigram,
    WeightDecigram,
    WeightLongTon,
    WeightTonne,
    WeightStone,
    WeightCarat,
    WeightShortTon,
    WeightSnowflake,
    WeightSoccerBall,
    WeightElephant,
    WeightWhale,

    SpeedCentimetersPerSecond,
    SpeedFeetPerSecond,
    SpeedKilometersPerHour,
    SpeedKnot,
    SpeedMach,
    SpeedMetersPerSecond,
    SpeedMilesPerHour,
    SpeedTurtle,
    SpeedHorse,
    SpeedJet,

    AngleDegree,
    AngleRadian,
    AngleGradian,

    PressureAtmosphere,
    PressureBar,
    PressureKiloPascal,
    PressureMillimeterOfMercury,
    PressurePascal,
    PressurePSI,
}

/// Identity of a unit.
///
/// Static units and currency units live in disjoint variants, so a
/// currency can never collide with a fixed unit no matter how either
/// set grows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitId {
    /// A unit of one of the statically built categories.
    Static(StaticUnit),
    /// A currency, identified by its ISO code.
    Currency(CurrencyCode),
}

impl UnitId {
    /// Create a currency unit id.
    pub fn currency(code: impl Into<String>) -> Self {
        UnitId::Currency(CurrencyCode::new(code))
    }

    /// Get the currency code if this is a currency unit.
    pub fn as_currency(&self) -> Option<&CurrencyCode> {
        match self {
            UnitId::Currency(code) => Some(code),
            UnitId::Static(_) => None,
        }
    }
}

impl From<StaticUnit> for UnitId {
    fn from(unit: StaticUnit) -> Self {
        UnitId::Static(unit)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitId::Static(unit) => write!(f, "{:?}", unit),
            UnitId::Currency(code) => write!(f, "currency:{}", code),
        }
    }
}
