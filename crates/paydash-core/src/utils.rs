//! Utility functions for paydash

use crate::{Error, Locale, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

/// No-break space, as emitted by `Intl.NumberFormat` before the currency symbol
const NBSP: char = '\u{a0}';

/// Naive layouts accepted for timestamps without an offset
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset), a naive date-time or a bare date. Values
/// without an offset are read as local time in `offset`; bare dates as local
/// midnight.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if none of the layouts match.
pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    let invalid = || Error::InvalidTimestamp {
        value: value.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    let naive = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    offset.from_local_datetime(&naive).single().ok_or_else(invalid)
}

/// Build a [`FixedOffset`] from minutes east of UTC
///
/// # Errors
///
/// Returns a configuration error if the offset is out of range (±24h).
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| Error::Configuration {
            message: format!("UTC offset of {minutes} minutes is out of range"),
        })
}

/// Format an amount of Vietnamese dong the way `Intl.NumberFormat` does for
/// the given locale.
///
/// VND has no minor unit, so amounts are rounded half away from zero.
/// `vi-VN` renders `200.000 ₫`, `en-US` renders `₫200,000`.
#[must_use]
pub fn format_currency(amount: Decimal, locale: Locale) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();

    match locale {
        Locale::Vi => format!("{sign}{}{NBSP}₫", group_digits(&digits, '.')),
        Locale::En => format!("{sign}₫{}", group_digits(&digits, ',')),
    }
}

/// Format a count with the locale's thousands separator
#[must_use]
pub fn format_count(count: usize, locale: Locale) -> String {
    let separator = match locale {
        Locale::Vi => '.',
        Locale::En => ',',
    };
    group_digits(&count.to_string(), separator)
}

/// Format a percentage with two decimals, e.g. `20.00%`
///
/// Ties round away from zero on the exact binary value, so `0.125` renders
/// `0.13%`. Non-finite values fall back to plain float formatting.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    Decimal::from_f64_retain(value).map_or_else(
        || format!("{value:.2}%"),
        |exact| {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}%")
        },
    )
}

/// Format `value` as a share of `total`.
///
/// A zero (or non-positive) total renders `0%`.
#[must_use]
pub fn format_share(value: f64, total: f64) -> String {
    if total > 0.0 {
        format_percentage(value / total * 100.0)
    } else {
        "0%".to_string()
    }
}

/// Insert `separator` between groups of three digits
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    grouped
}
