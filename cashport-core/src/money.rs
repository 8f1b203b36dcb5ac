//! Money conversions for endpoints that report cent-integer strings.

use anyhow::{Result, bail};

/// Convert a cent-integer string to base units: pad to at least two digits
/// with leading zeros, then insert the decimal point two characters from
/// the end ("1" -> 0.01, "150" -> 1.50). A leading sign passes through.
pub fn cents_to_units(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("not a cent-integer amount: {raw:?}");
    }
    let padded = format!("{digits:0>2}");
    let (units, cents) = padded.split_at(padded.len() - 2);
    let units = if units.is_empty() { "0" } else { units };
    Ok(sign * format!("{units}.{cents}").parse::<f64>()?)
}
