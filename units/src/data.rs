//! Hard-coded unit catalogue, base factors and explicit conversions.
//!
//! Base factors express each unit relative to one reference unit of its
//! category: meters for length, megabytes for data, kilograms for weight,
//! centimeters per second for speed, milliliters for volume, seconds for
//! time, atmospheres for pressure, degrees for angles, joules for energy,
//! watts for power and square meters for area.

use convdata_common::StaticUnit::{self, *};
use convdata_common::{CategoryId, ConversionData, ExplicitConversionData};

use crate::region::RegionPreferences;

/// How a unit takes part in the default source/target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Never selected by default.
    None,
    /// Always the default source.
    Source,
    /// Always the default target.
    Target,
    /// Source in US customary regions, target in metric regions.
    Metric,
    /// Source in metric regions, target in US customary regions.
    Customary,
    /// Source in Fahrenheit regions, target elsewhere.
    Celsius,
    /// Source outside Fahrenheit regions, target in them.
    Fahrenheit,
    /// Source where power is quoted in watts.
    Watt,
    /// Source where power is quoted in kilowatts.
    Kilowatt,
}

impl Selection {
    /// Resolve `(is_conversion_source, is_conversion_target)` for a region.
    pub fn flags(&self, region: &RegionPreferences) -> (bool, bool) {
        match self {
            Selection::None => (false, false),
            Selection::Source => (true, false),
            Selection::Target => (false, true),
            Selection::Metric => (region.use_us_customary, region.use_si()),
            Selection::Customary => (region.use_si(), region.use_us_customary),
            Selection::Celsius => (region.use_fahrenheit, !region.use_fahrenheit),
            Selection::Fahrenheit => (!region.use_fahrenheit, region.use_fahrenheit),
            Selection::Watt => (region.use_watt, false),
            Selection::Kilowatt => (!region.use_watt, false),
        }
    }
}

/// Catalogue entry of a static unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitSpec {
    pub unit: StaticUnit,
    /// Suffix of the `UnitName_` / `UnitAbbreviation_` resource keys.
    pub key: &'static str,
    pub order: i32,
    pub selection: Selection,
    pub whimsical: bool,
}

const fn unit(unit: StaticUnit, key: &'static str, order: i32) -> UnitSpec {
    UnitSpec {
        unit,
        key,
        order,
        selection: Selection::None,
        whimsical: false,
    }
}

const fn selected(unit: StaticUnit, key: &'static str, order: i32, selection: Selection) -> UnitSpec {
    UnitSpec {
        unit,
        key,
        order,
        selection,
        whimsical: false,
    }
}

const fn whimsical(unit: StaticUnit, key: &'static str, order: i32) -> UnitSpec {
    UnitSpec {
        unit,
        key,
        order,
        selection: Selection::None,
        whimsical: true,
    }
}

impl UnitSpec {
    /// Check if the unit is offered in a region.
    pub fn is_available(&self, region: &RegionPreferences) -> bool {
        match self.unit {
            AreaPyeong => region.use_pyeong,
            _ => true,
        }
    }
}

const AREA: &[UnitSpec] = &[
    unit(AreaSquareMillimeter, "SquareMillimeter", 1),
    unit(AreaSquareCentimeter, "SquareCentimeter", 2),
    selected(AreaSquareMeter, "SquareMeter", 3, Selection::Metric),
    unit(AreaHectare, "Hectare", 4),
    unit(AreaSquareKilometer, "SquareKilometer", 5),
    unit(AreaSquareInch, "SquareInch", 6),
    selected(AreaSquareFoot, "SquareFoot", 7, Selection::Customary),
    unit(AreaSquareYard, "SquareYard", 8),
    unit(AreaAcre, "Acre", 9),
    unit(AreaSquareMile, "SquareMile", 10),
    whimsical(AreaHand, "Hand", 11),
    whimsical(AreaPaper, "Paper", 12),
    whimsical(AreaSoccerField, "SoccerField", 13),
    whimsical(AreaCastle, "Castle", 14),
    unit(AreaPyeong, "Pyeong", 15),
];

const DATA: &[UnitSpec] = &[
    unit(DataBit, "Bit", 1),
    unit(DataNibble, "Nibble", 2),
    unit(DataByte, "Byte", 3),
    unit(DataKilobit, "Kilobit", 4),
    unit(DataKibibits, "Kibibits", 5),
    unit(DataKilobyte, "Kilobyte", 6),
    unit(DataKibibytes, "Kibibytes", 7),
    unit(DataMegabit, "Megabit", 8),
    unit(DataMebibits, "Mebibits", 9),
    selected(DataMegabyte, "Megabyte", 10, Selection::Target),
    unit(DataMebibytes, "Mebibytes", 11),
    unit(DataGigabit, "Gigabit", 12),
    unit(DataGibibits, "Gibibits", 13),
    selected(DataGigabyte, "Gigabyte", 14, Selection::Source),
    unit(DataGibibytes, "Gibibytes", 15),
    unit(DataTerabit, "Terabit", 16),
    unit(DataTebibits, "Tebibits", 17),
    unit(DataTerabyte, "Terabyte", 18),
    unit(DataTebibytes, "Tebibytes", 19),
    unit(DataPetabit, "Petabit", 20),
    unit(DataPebibits, "Pebibits", 21),
    unit(DataPetabyte, "Petabyte", 22),
    unit(DataPebibytes, "Pebibytes", 23),
    unit(DataExabits, "Exabits", 24),
    unit(DataExbibits, "Exbibits", 25),
    unit(DataExabytes, "Exabytes", 26),
    unit(DataExbibytes, "Exbibytes", 27),
    unit(DataZetabits, "Zetabits", 28),
    unit(DataZebibits, "Zebibits", 29),
    unit(DataZetabytes, "Zetabytes", 30),
    unit(DataZebibytes, "Zebibytes", 31),
    unit(DataYottabit, "Yottabit", 32),
    unit(DataYobibits, "Yobibits", 33),
    unit(DataYottabyte, "Yottabyte", 34),
    unit(DataYobibytes, "Yobibytes", 35),
    whimsical(DataFloppyDisk, "FloppyDisk", 13),
    whimsical(DataCD, "CD", 14),
    whimsical(DataDVD, "DVD", 15),
];

const ENERGY: &[UnitSpec] = &[
    unit(EnergyElectronVolt, "Electron-Volt", 1),
    selected(EnergyJoule, "Joule", 2, Selection::Source),
    unit(EnergyKilojoule, "Kilojoule", 3),
    unit(EnergyCalorie, "Calorie", 4),
    selected(EnergyKilocalorie, "Kilocalorie", 5, Selection::Target),
    unit(EnergyFootPound, "Foot-Pound", 6),
    unit(EnergyBritishThermalUnit, "BritishThermalUnit", 7),
    whimsical(EnergyBattery, "Battery", 8),
    whimsical(EnergyBanana, "Banana", 9),
    whimsical(EnergySliceOfCake, "SliceOfCake", 10),
    unit(EnergyKilowatthour, "Kilowatthour", 11),
];

const LENGTH: &[UnitSpec] = &[
    unit(LengthAngstrom, "Angstrom", 1),
    unit(LengthNanometer, "Nanometer", 2),
    unit(LengthMicron, "Micron", 3),
    unit(LengthMillimeter, "Millimeter", 4),
    selected(LengthCentimeter, "Centimeter", 5, Selection::Metric),
    unit(LengthMeter, "Meter", 6),
    unit(LengthKilometer, "Kilometer", 7),
    selected(LengthInch, "Inch", 8, Selection::Customary),
    unit(LengthFoot, "Foot", 9),
    unit(LengthYard, "Yard", 10),
    unit(LengthMile, "Mile", 11),
    unit(LengthNauticalMile, "NauticalMile", 12),
    whimsical(LengthPaperclip, "Paperclip", 13),
    whimsical(LengthHand, "Hand", 14),
    whimsical(LengthJumboJet, "JumboJet", 15),
];

const POWER: &[UnitSpec] = &[
    selected(PowerWatt, "Watt", 1, Selection::Watt),
    selected(PowerKilowatt, "Kilowatt", 2, Selection::Kilowatt),
    selected(PowerHorsepower, "Horsepower", 3, Selection::Target),
    unit(PowerFootPoundPerMinute, "Foot-PoundPerMinute", 4),
    unit(PowerBritishThermalUnitPerMinute, "BTUPerMinute", 5),
    whimsical(PowerLightBulb, "LightBulb", 6),
    whimsical(PowerHorse, "Horse", 7),
    whimsical(PowerTrainEngine, "TrainEngine", 8),
];

const TEMPERATURE: &[UnitSpec] = &[
    selected(TemperatureDegreesCelsius, "DegreesCelsius", 1, Selection::Celsius),
    selected(TemperatureDegreesFahrenheit, "DegreesFahrenheit", 2, Selection::Fahrenheit),
    unit(TemperatureKelvin, "Kelvin", 3),
];

const TIME: &[UnitSpec] = &[
    unit(TimeMicrosecond, "Microsecond", 1),
    unit(TimeMillisecond, "Millisecond", 2),
    unit(TimeSecond, "Second", 3),
    selected(TimeMinute, "Minute", 4, Selection::Target),
    selected(TimeHour, "Hour", 5, Selection::Source),
    unit(TimeDay, "Day", 6),
    unit(TimeWeek, "Week", 7),
    unit(TimeYear, "Year", 8),
];

const SPEED: &[UnitSpec] = &[
    unit(SpeedCentimetersPerSecond, "CentimetersPerSecond", 1),
    unit(SpeedMetersPerSecond, "MetersPerSecond", 2),
    selected(SpeedKilometersPerHour, "KilometersPerHour", 3, Selection::Metric),
    unit(SpeedFeetPerSecond, "FeetPerSecond", 4),
    selected(SpeedMilesPerHour, "MilesPerHour", 5, Selection::Customary),
    unit(SpeedKnot, "Knot", 6),
    unit(SpeedMach, "Mach", 7),
    whimsical(SpeedTurtle, "Turtle", 8),
    whimsical(SpeedHorse, "Horse", 9),
    whimsical(SpeedJet, "Jet", 10),
];

const VOLUME: &[UnitSpec] = &[
    selected(VolumeMilliliter, "Milliliter", 1, Selection::Metric),
    unit(VolumeCubicCentimeter, "CubicCentimeter", 2),
    unit(VolumeLiter, "Liter", 3),
    unit(VolumeCubicMeter, "CubicMeter", 4),
    selected(VolumeTeaspoonUS, "TeaspoonUS", 5, Selection::Customary),
    unit(VolumeTablespoonUS, "TablespoonUS", 6),
    unit(VolumeFluidOunceUS, "FluidOunceUS", 7),
    unit(VolumeCupUS, "CupUS", 8),
    unit(VolumePintUS, "PintUS", 9),
    unit(VolumeQuartUS, "QuartUS", 10),
    unit(VolumeGallonUS, "GallonUS", 11),
    unit(VolumeCubicInch, "CubicInch", 12),
    unit(VolumeCubicFoot, "CubicFoot", 13),
    unit(VolumeCubicYard, "CubicYard", 14),
    unit(VolumeTeaspoonUK, "TeaspoonUK", 15),
    unit(VolumeTablespoonUK, "TablespoonUK", 16),
    unit(VolumeFluidOunceUK, "FluidOunceUK", 17),
    unit(VolumePintUK, "PintUK", 18),
    unit(VolumeQuartUK, "QuartUK", 19),
    unit(VolumeGallonUK, "GallonUK", 20),
    whimsical(VolumeCoffeeCup, "CoffeeCup", 22),
    whimsical(VolumeBathtub, "Bathtub", 23),
    whimsical(VolumeSwimmingPool, "SwimmingPool", 24),
];

const WEIGHT: &[UnitSpec] = &[
    unit(WeightCarat, "Carat", 1),
    unit(WeightMilligram, "Milligram", 2),
    unit(WeightCentigram, "Centigram", 3),
    unit(WeightDecigram, "Decigram", 4),
    unit(WeightGram, "Gram", 5),
    unit(WeightDecagram, "Decagram", 6),
    unit(WeightHectogram, "Hectogram", 7),
    selected(WeightKilogram, "Kilogram", 8, Selection::Metric),
    unit(WeightTonne, "Tonne", 9),
    unit(WeightOunce, "Ounce", 10),
    selected(WeightPound, "Pound", 11, Selection::Customary),
    unit(WeightStone, "Stone", 12),
    unit(WeightShortTon, "ShortTon", 13),
    unit(WeightLongTon, "LongTon", 14),
    whimsical(WeightSnowflake, "Snowflake", 15),
    whimsical(WeightSoccerBall, "SoccerBall", 16),
    whimsical(WeightElephant, "Elephant", 17),
    whimsical(WeightWhale, "Whale", 18),
];

const PRESSURE: &[UnitSpec] = &[
    selected(PressureAtmosphere, "Atmosphere", 1, Selection::Source),
    selected(PressureBar, "Bar", 2, Selection::Target),
    unit(PressureKiloPascal, "KiloPascal", 3),
    unit(PressureMillimeterOfMercury, "MillimeterOfMercury", 4),
    unit(PressurePascal, "Pascal", 5),
    unit(PressurePSI, "PSI", 6),
];

const ANGLE: &[UnitSpec] = &[
    selected(AngleDegree, "Degree", 1, Selection::Source),
    selected(AngleRadian, "Radian", 2, Selection::Target),
    unit(AngleGradian, "Gradian", 3),
];

/// Catalogue of a category, in no particular order.
pub fn units_of(category: CategoryId) -> &'static [UnitSpec] {
    match category {
        CategoryId::Area => AREA,
        CategoryId::Data => DATA,
        CategoryId::Energy => ENERGY,
        CategoryId::Length => LENGTH,
        CategoryId::Power => POWER,
        CategoryId::Temperature => TEMPERATURE,
        CategoryId::Time => TIME,
        CategoryId::Speed => SPEED,
        CategoryId::Volume => VOLUME,
        CategoryId::Weight => WEIGHT,
        CategoryId::Pressure => PRESSURE,
        CategoryId::Angle => ANGLE,
        CategoryId::Currency => &[],
    }
}

/// Base factors of every linear unit.
pub const BASE_FACTORS: &[(CategoryId, StaticUnit, f64)] = &[
    (CategoryId::Area, AreaAcre, 4046.8564224),
    (CategoryId::Area, AreaSquareMeter, 1.0),
    (CategoryId::Area, AreaSquareFoot, 0.09290304),
    (CategoryId::Area, AreaSquareYard, 0.83612736),
    (CategoryId::Area, AreaSquareMillimeter, 0.000001),
    (CategoryId::Area, AreaSquareCentimeter, 0.0001),
    (CategoryId::Area, AreaSquareInch, 0.00064516),
    (CategoryId::Area, AreaSquareMile, 2589988.110336),
    (CategoryId::Area, AreaSquareKilometer, 1000000.0),
    (CategoryId::Area, AreaHectare, 10000.0),
    (CategoryId::Area, AreaHand, 0.012516104),
    (CategoryId::Area, AreaPaper, 0.06032246),
    (CategoryId::Area, AreaSoccerField, 10869.66),
    (CategoryId::Area, AreaCastle, 100000.0),
    (CategoryId::Area, AreaPyeong, 400.0 / 121.0),
    (CategoryId::Data, DataBit, 0.000000125),
    (CategoryId::Data, DataNibble, 0.0000005),
    (CategoryId::Data, DataByte, 0.000001),
    (CategoryId::Data, DataKilobyte, 0.001),
    (CategoryId::Data, DataMegabyte, 1.0),
    (CategoryId::Data, DataGigabyte, 1000.0),
    (CategoryId::Data, DataTerabyte, 1000000.0),
    (CategoryId::Data, DataPetabyte, 1000000000.0),
    (CategoryId::Data, DataExabytes, 1000000000000.0),
    (CategoryId::Data, DataZetabytes, 1000000000000000.0),
    (CategoryId::Data, DataYottabyte, 1000000000000000000.0),
    (CategoryId::Data, DataKilobit, 0.000125),
    (CategoryId::Data, DataMegabit, 0.125),
    (CategoryId::Data, DataGigabit, 125.0),
    (CategoryId::Data, DataTerabit, 125000.0),
    (CategoryId::Data, DataPetabit, 125000000.0),
    (CategoryId::Data, DataExabits, 125000000000.0),
    (CategoryId::Data, DataZetabits, 125000000000000.0),
    (CategoryId::Data, DataYottabit, 125000000000000000.0),
    (CategoryId::Data, DataGibibits, 134.217728),
    (CategoryId::Data, DataGibibytes, 1073.741824),
    (CategoryId::Data, DataKibibits, 0.000128),
    (CategoryId::Data, DataKibibytes, 0.001024),
    (CategoryId::Data, DataMebibits, 0.131072),
    (CategoryId::Data, DataMebibytes, 1.048576),
    (CategoryId::Data, DataPebibits, 140737488.355328),
    (CategoryId::Data, DataPebibytes, 1125899906.842624),
    (CategoryId::Data, DataTebibits, 137438.953472),
    (CategoryId::Data, DataTebibytes, 1099511.627776),
    (CategoryId::Data, DataExbibits, 144115188075.855872),
    (CategoryId::Data, DataExbibytes, 1152921504606.846976),
    (CategoryId::Data, DataZebibits, 147573952589676.412928),
    (CategoryId::Data, DataZebibytes, 1180591620717411.303424),
    (CategoryId::Data, DataYobibits, 151115727451828646.838272),
    (CategoryId::Data, DataYobibytes, 1208925819614629174.706176),
    (CategoryId::Data, DataFloppyDisk, 1.474560),
    (CategoryId::Data, DataCD, 700.0),
    (CategoryId::Data, DataDVD, 4700.0),
    (CategoryId::Energy, EnergyCalorie, 4.184),
    (CategoryId::Energy, EnergyKilocalorie, 4184.0),
    (CategoryId::Energy, EnergyBritishThermalUnit, 1055.056),
    (CategoryId::Energy, EnergyKilojoule, 1000.0),
    (CategoryId::Energy, EnergyKilowatthour, 3600000.0),
    (CategoryId::Energy, EnergyElectronVolt, 0.0000000000000000001602176565),
    (CategoryId::Energy, EnergyJoule, 1.0),
    (CategoryId::Energy, EnergyFootPound, 1.3558179483314),
    (CategoryId::Energy, EnergyBattery, 9000.0),
    (CategoryId::Energy, EnergyBanana, 439614.0),
    (CategoryId::Energy, EnergySliceOfCake, 1046700.0),
    (CategoryId::Length, LengthInch, 0.0254),
    (CategoryId::Length, LengthFoot, 0.3048),
    (CategoryId::Length, LengthYard, 0.9144),
    (CategoryId::Length, LengthMile, 1609.344),
    (CategoryId::Length, LengthMicron, 0.000001),
    (CategoryId::Length, LengthMillimeter, 0.001),
    (CategoryId::Length, LengthNanometer, 0.000000001),
    (CategoryId::Length, LengthAngstrom, 0.0000000001),
    (CategoryId::Length, LengthCentimeter, 0.01),
    (CategoryId::Length, LengthMeter, 1.0),
    (CategoryId::Length, LengthKilometer, 1000.0),
    (CategoryId::Length, LengthNauticalMile, 1852.0),
    (CategoryId::Length, LengthPaperclip, 0.035052),
    (CategoryId::Length, LengthHand, 0.18669),
    (CategoryId::Length, LengthJumboJet, 76.0),
    (CategoryId::Power, PowerBritishThermalUnitPerMinute, 17.58426666666667),
    (CategoryId::Power, PowerFootPoundPerMinute, 0.0225969658055233),
    (CategoryId::Power, PowerWatt, 1.0),
    (CategoryId::Power, PowerKilowatt, 1000.0),
    (CategoryId::Power, PowerHorsepower, 745.69987158227022),
    (CategoryId::Power, PowerLightBulb, 60.0),
    (CategoryId::Power, PowerHorse, 745.7),
    (CategoryId::Power, PowerTrainEngine, 2982799.486329081),
    (CategoryId::Time, TimeDay, 86400.0),
    (CategoryId::Time, TimeSecond, 1.0),
    (CategoryId::Time, TimeWeek, 604800.0),
    (CategoryId::Time, TimeYear, 31557600.0),
    (CategoryId::Time, TimeMillisecond, 0.001),
    (CategoryId::Time, TimeMicrosecond, 0.000001),
    (CategoryId::Time, TimeMinute, 60.0),
    (CategoryId::Time, TimeHour, 3600.0),
    (CategoryId::Volume, VolumeCupUS, 236.588237),
    (CategoryId::Volume, VolumePintUS, 473.176473),
    (CategoryId::Volume, VolumePintUK, 568.26125),
    (CategoryId::Volume, VolumeQuartUS, 946.352946),
    (CategoryId::Volume, VolumeQuartUK, 1136.5225),
    (CategoryId::Volume, VolumeGallonUS, 3785.411784),
    (CategoryId::Volume, VolumeGallonUK, 4546.09),
    (CategoryId::Volume, VolumeLiter, 1000.0),
    (CategoryId::Volume, VolumeTeaspoonUS, 4.92892159375),
    (CategoryId::Volume, VolumeTablespoonUS, 14.78676478125),
    (CategoryId::Volume, VolumeCubicCentimeter, 1.0),
    (CategoryId::Volume, VolumeCubicYard, 764554.857984),
    (CategoryId::Volume, VolumeCubicMeter, 1000000.0),
    (CategoryId::Volume, VolumeMilliliter, 1.0),
    (CategoryId::Volume, VolumeCubicInch, 16.387064),
    (CategoryId::Volume, VolumeCubicFoot, 28316.846592),
    (CategoryId::Volume, VolumeFluidOunceUS, 29.5735295625),
    (CategoryId::Volume, VolumeFluidOunceUK, 28.4130625),
    (CategoryId::Volume, VolumeTeaspoonUK, 5.91938802083333333333),
    (CategoryId::Volume, VolumeTablespoonUK, 17.7581640625),
    (CategoryId::Volume, VolumeCoffeeCup, 236.5882),
    (CategoryId::Volume, VolumeBathtub, 378541.2),
    (CategoryId::Volume, VolumeSwimmingPool, 3750000000.0),
    (CategoryId::Weight, WeightKilogram, 1.0),
    (CategoryId::Weight, WeightHectogram, 0.1),
    (CategoryId::Weight, WeightDecagram, 0.01),
    (CategoryId::Weight, WeightGram, 0.001),
    (CategoryId::Weight, WeightPound, 0.45359237),
    (CategoryId::Weight, WeightOunce, 0.028349523125),
    (CategoryId::Weight, WeightMilligram, 0.000001),
    (CategoryId::Weight, WeightCentigram, 0.00001),
    (CategoryId::Weight, WeightDecigram, 0.0001),
    (CategoryId::Weight, WeightLongTon, 1016.0469088),
    (CategoryId::Weight, WeightTonne, 1000.0),
    (CategoryId::Weight, WeightStone, 6.35029318),
    (CategoryId::Weight, WeightCarat, 0.0002),
    (CategoryId::Weight, WeightShortTon, 907.18474),
    (CategoryId::Weight, WeightSnowflake, 0.000002),
    (CategoryId::Weight, WeightSoccerBall, 0.4325),
    (CategoryId::Weight, WeightElephant, 4000.0),
    (CategoryId::Weight, WeightWhale, 90000.0),
    (CategoryId::Speed, SpeedCentimetersPerSecond, 1.0),
    (CategoryId::Speed, SpeedFeetPerSecond, 30.48),
    (CategoryId::Speed, SpeedKilometersPerHour, 27.777777777777777777778),
    (CategoryId::Speed, SpeedKnot, 51.44),
    (CategoryId::Speed, SpeedMach, 34030.0),
    (CategoryId::Speed, SpeedMetersPerSecond, 100.0),
    (CategoryId::Speed, SpeedMilesPerHour, 44.7),
    (CategoryId::Speed, SpeedTurtle, 8.94),
    (CategoryId::Speed, SpeedHorse, 2011.5),
    (CategoryId::Speed, SpeedJet, 24585.0),
    (CategoryId::Angle, AngleDegree, 1.0),
    (CategoryId::Angle, AngleRadian, 57.29577951308233),
    (CategoryId::Angle, AngleGradian, 0.9),
    (CategoryId::Pressure, PressureAtmosphere, 1.0),
    (CategoryId::Pressure, PressureBar, 0.9869232667160128),
    (CategoryId::Pressure, PressureKiloPascal, 0.0098692326671601),
    (CategoryId::Pressure, PressureMillimeterOfMercury, 0.0013155687145324),
    (CategoryId::Pressure, PressurePascal, 9.869232667160128e-6),
    (CategoryId::Pressure, PressurePSI, 0.068045961016531),
];

/// Pairwise conversions for categories that are not purely multiplicative.
///
/// Every ordered pair, self-pairs included, is listed.
pub fn explicit_conversions() -> Vec<ExplicitConversionData> {
    const FIVE_NINTHS: f64 = 5.0 / 9.0;

    let temperature = |parent, unit, ratio, offset, offset_first| {
        ExplicitConversionData::new(
            CategoryId::Temperature,
            parent,
            unit,
            ConversionData::new(ratio, offset, offset_first),
        )
    };

    vec![
        temperature(TemperatureDegreesCelsius, TemperatureDegreesCelsius, 1.0, 0.0, false),
        temperature(TemperatureDegreesCelsius, TemperatureDegreesFahrenheit, 1.8, 32.0, false),
        temperature(TemperatureDegreesCelsius, TemperatureKelvin, 1.0, 273.15, false),
        temperature(TemperatureDegreesFahrenheit, TemperatureDegreesCelsius, FIVE_NINTHS, -32.0, true),
        temperature(TemperatureDegreesFahrenheit, TemperatureDegreesFahrenheit, 1.0, 0.0, false),
        temperature(TemperatureDegreesFahrenheit, TemperatureKelvin, FIVE_NINTHS, 459.67, true),
        temperature(TemperatureKelvin, TemperatureDegreesCelsius, 1.0, -273.15, true),
        temperature(TemperatureKelvin, TemperatureDegreesFahrenheit, 1.8, -459.67, false),
        temperature(TemperatureKelvin, TemperatureKelvin, 1.0, 0.0, false),
    ]
}
