//! Accessors for raw endpoint items (`serde_json::Value` trees).

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// String field at a JSON pointer.
pub fn str_at<'a>(item: &'a Value, pointer: &str) -> Option<&'a str> {
    item.pointer(pointer).and_then(Value::as_str)
}

/// Numeric field at a JSON pointer; money fields arrive either as JSON
/// numbers or as decimal strings depending on the endpoint.
pub fn f64_at(item: &Value, pointer: &str) -> Option<f64> {
    match item.pointer(pointer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Raw field rendered as text, whatever its JSON type (cent-integer
/// endpoints report amounts as strings or numbers interchangeably).
pub fn text_at(item: &Value, pointer: &str) -> Option<String> {
    match item.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a calendar day out of a raw date field. Endpoints mix plain
/// `YYYY-MM-DD` dates with RFC3339 timestamps.
pub fn day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

/// Canonical date with fallback: the primary raw field wins when it
/// parses, otherwise the secondary must parse. A record with no parseable
/// date is a data error, not a silent null.
pub fn day_with_fallback(
    primary: Option<&str>,
    secondary: Option<&str>,
    what: &str,
) -> Result<NaiveDate> {
    primary
        .and_then(day)
        .or_else(|| secondary.and_then(day))
        .with_context(|| format!("{what}: no parseable date (got {primary:?} / {secondary:?})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_f64_at_accepts_numbers_and_strings() {
        let item = json!({"net_cash": {"amount": "5.25"}, "value": {"amount": 10.0}});
        assert_eq!(f64_at(&item, "/net_cash/amount"), Some(5.25));
        assert_eq!(f64_at(&item, "/value/amount"), Some(10.0));
        assert_eq!(f64_at(&item, "/missing"), None);
    }

    #[test]
    fn test_day_parses_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        assert_eq!(day("2023-05-01"), Some(expected));
        assert_eq!(day("2023-05-01T08:30:00.000Z"), Some(expected));
        assert_eq!(day("2023-05-01 08:30:00 UTC"), Some(expected));
        assert_eq!(day(""), None);
        assert_eq!(day("not a date"), None);
    }

    #[test]
    fn test_day_with_fallback_prefers_primary() {
        let d = day_with_fallback(Some("2023-05-01"), Some("2023-04-30"), "deposit").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 5, 1).unwrap());

        let d = day_with_fallback(Some(""), Some("2023-04-30"), "deposit").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 4, 30).unwrap());

        assert!(day_with_fallback(None, None, "deposit").is_err());
    }
}
