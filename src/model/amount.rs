//! Parsing and display of transaction amounts.
//!
//! Mint writes amounts as plain decimal numbers, e.g. `4.50` or `1200.00`. The sign is carried by
//! the `Transaction Type` column rather than the amount, so amounts are usually non-negative, but
//! nothing here depends on that.

use crate::model::AMOUNT;
use crate::{Error, Result};

/// Parses an `Amount` field value into a number.
///
/// Surrounding whitespace is ignored. Anything that is not a finite number is a format error.
///
/// # Examples
/// ```
/// # use mint_tx::model::parse_amount;
/// assert_eq!(parse_amount("4.50").unwrap(), 4.5);
/// assert_eq!(parse_amount(" -12 ").unwrap(), -12.0);
/// assert!(parse_amount("$4.50").is_err());
/// ```
pub fn parse_amount(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|e| Error::format(AMOUNT, value, e))?;
    if !parsed.is_finite() {
        return Err(Error::format(AMOUNT, value, "amount must be a finite number"));
    }
    Ok(parsed)
}

/// Formats an amount for people to read: a dollar sign, thousands separators and two decimal
/// places, e.g. `-$60,000.00`.
pub fn display_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_num::format_num!(",.2", value.abs()))
}
