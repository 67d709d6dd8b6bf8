//! Rendering of currency ratios and the cache timestamp.

use chrono::Local;
use convdata_common::time::Timestamp;
use convdata_common::{format_localized, StringProvider};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits shown in a ratio equality.
pub const RATIO_DIGITS: u32 = 4;

const RATIO_FORMAT_KEY: &str = "CurrencyFromToRatioFormat";
const TIMESTAMP_FORMAT_KEY: &str = "CurrencyTimestampFormat";

/// Truncate a ratio to `RATIO_DIGITS` fraction digits, never rounding up.
///
/// Returns `None` for values that are not finite or not representable.
pub fn truncate_ratio(ratio: f64) -> Option<Decimal> {
    let mut value = Decimal::from_f64(ratio)?.round_dp_with_strategy(RATIO_DIGITS, RoundingStrategy::ToZero);
    value.rescale(RATIO_DIGITS);
    Some(value)
}

/// Render a decimal with thousands separators in the integer part.
pub fn group_digits(value: &Decimal) -> String {
    let text = value.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() && !value.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Build the "1 A = x B" display and accessible strings.
///
/// `from` and `to` are `(display, accessible)` names of the two currencies.
pub fn ratio_equality(
    strings: &dyn StringProvider,
    ratio: f64,
    from: (&str, &str),
    to: (&str, &str),
) -> Option<(String, String)> {
    let rounded = group_digits(&truncate_ratio(ratio)?);
    let template = strings.localized(RATIO_FORMAT_KEY);

    let display = format_localized(&template, &["1", from.0, &rounded, to.0]);
    let accessible = format_localized(&template, &["1", from.1, &rounded, to.1]);
    Some((display, accessible))
}

/// Render "Updated <date> <time>" in local time.
pub fn format_timestamp(strings: &dyn StringProvider, timestamp: Timestamp) -> String {
    let local = timestamp.with_timezone(&Local);
    let date = local.format("%b %-d, %Y").to_string();
    let time = local.format("%-I:%M %p").to_string();
    format_localized(&strings.localized(TIMESTAMP_FORMAT_KEY), &[&date, &time])
}
