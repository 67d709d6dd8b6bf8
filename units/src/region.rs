//! Regional measurement preferences.

/// Measurement conventions of a region, deciding default source/target units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPreferences {
    /// Two-letter region code, uppercase.
    pub region_code: String,
    /// US customary units are the everyday system.
    pub use_us_customary: bool,
    /// Fahrenheit is the everyday temperature scale.
    pub use_fahrenheit: bool,
    /// Power is quoted in watts rather than kilowatts.
    pub use_watt: bool,
    /// The Korean floorspace unit is offered.
    pub use_pyeong: bool,
}

impl RegionPreferences {
    /// Derive preferences from a region code such as `US` or `GB`.
    pub fn for_region(region_code: &str) -> Self {
        let region_code = region_code.trim().to_ascii_uppercase();
        let code = region_code.as_str();

        // US and the Freely Associated States.
        let customary_and_fahrenheit = matches!(code, "US" | "FM" | "MH" | "PW");
        let use_us_customary = customary_and_fahrenheit || code == "LR";
        let use_fahrenheit = customary_and_fahrenheit || matches!(code, "BS" | "KY" | "LR");

        Self {
            use_us_customary,
            use_fahrenheit,
            use_watt: code == "GB",
            use_pyeong: matches!(code, "KR" | "KP"),
            region_code,
        }
    }

    /// Metric (SI) units are the everyday system.
    pub fn use_si(&self) -> bool {
        !self.use_us_customary
    }
}
