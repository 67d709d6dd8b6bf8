//! Parsing of the metadata and ratio payloads.

use std::collections::HashMap;

use convdata_common::{CurrencyRatio, CurrencyStaticData};
use serde::Deserialize;

use crate::error::LoadResult;

/// One entry of the ratios payload. Extra fields (`Ch`, `Pc`, `Yh`, `Yl`) are ignored.
#[derive(Debug, Deserialize)]
struct RatioRecord {
    #[serde(rename = "Rt")]
    ratio: f64,
    #[serde(rename = "An")]
    code: String,
}

/// Parse the metadata payload, sorted by country name.
pub fn parse_static_data(json: &str) -> LoadResult<Vec<CurrencyStaticData>> {
    let mut records: Vec<CurrencyStaticData> = serde_json::from_str(json)?;
    records.sort_by(|a, b| a.country_name.cmp(&b.country_name));
    Ok(records)
}

/// Parse the ratios payload into a map keyed by target currency code.
pub fn parse_ratios(json: &str, source_currency: &str) -> LoadResult<HashMap<String, CurrencyRatio>> {
    let records: Vec<RatioRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let ratio = CurrencyRatio {
                ratio: record.ratio,
                source_currency_code: source_currency.to_string(),
                target_currency_code: record.code.clone(),
            };
            (record.code, ratio)
        })
        .collect())
}
