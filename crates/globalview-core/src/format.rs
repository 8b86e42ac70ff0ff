//! Date, percentage, and currency formatting shared by every view model.
//!
//! All functions are total: unusable input yields a sentinel (`"-"`, `"—"`,
//! `None`, or `0.0`), never a panic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Placeholder rendered for a missing or unparseable display value.
pub const EM_DASH: &str = "\u{2014}";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses an ISO-8601 timestamp or a bare `YYYY-MM-DD` date.
///
/// Timestamps without an offset and bare dates are read as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Renders the span between two dates as `"<N> days"`.
///
/// `N = max(0, ceil((end - start) / 1 day))`. Returns `"-"` when either date
/// is missing or does not parse.
#[must_use]
pub fn format_duration(start: Option<&str>, end: Option<&str>) -> String {
    let (Some(start), Some(end)) = (
        start.and_then(parse_timestamp),
        end.and_then(parse_timestamp),
    ) else {
        return "-".to_string();
    };
    let diff_ms = (end - start).num_milliseconds();
    let days = if diff_ms <= 0 {
        0
    } else {
        (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    };
    format!("{days} days")
}

/// Whole days elapsed since `raw`, floored and never negative.
#[must_use]
pub fn days_since(raw: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let then = raw.and_then(parse_timestamp)?;
    Some((now - then).num_days().max(0))
}

/// Rounds to one decimal place; non-finite input becomes `0.0`.
#[must_use]
pub fn round1(value: f64) -> f64 {
    if value.is_finite() {
        (value * 10.0).round() / 10.0
    } else {
        0.0
    }
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
///
/// A zero or non-finite baseline yields `0.0` rather than infinity.
#[must_use]
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        return 0.0;
    }
    round1((current - previous) / previous.abs() * 100.0)
}

/// Signed one-decimal percentage, e.g. `"+12.5%"`, `"-3.0%"`, `"0.0%"`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return EM_DASH.to_string();
    }
    let rounded = round1(value);
    if rounded > 0.0 {
        format!("+{rounded:.1}%")
    } else if rounded < 0.0 {
        format!("{rounded:.1}%")
    } else {
        "0.0%".to_string()
    }
}

/// US-dollar amount with thousands separators, e.g. `"$1,234.50"`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return EM_DASH.to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Short display date, e.g. `"Mar 15, 2025"`, or `"—"` when unusable.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp).map_or_else(
        || EM_DASH.to_string(),
        |dt| dt.format("%b %-d, %Y").to_string(),
    )
}
