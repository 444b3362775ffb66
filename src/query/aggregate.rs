//! Summation of transaction amounts.

use crate::model::Record;
use crate::Result;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Adds up the `Amount` of every record. An empty input sums to zero.
///
/// The running total is kept as a `Decimal`, so the result is the same whatever order the
/// records come in. Amounts too large for a `Decimal` are summed as plain `f64` instead.
///
/// # Errors
/// `Error::Format` if any amount is not a number, `Error::MissingField` if a record has no
/// `Amount`.
pub fn sum_amounts<I, R>(records: I) -> Result<f64>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    let amounts = records
        .into_iter()
        .map(|record| record.amount())
        .collect::<Result<Vec<f64>>>()?;
    match decimal_sum(&amounts) {
        Some(total) => Ok(total),
        None => {
            debug!("Amounts out of decimal range, summing {} as f64", amounts.len());
            Ok(amounts.iter().sum())
        }
    }
}

/// `None` when an amount or the running total does not fit in a `Decimal`.
fn decimal_sum(amounts: &[f64]) -> Option<f64> {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        total = total.checked_add(to_decimal(*amount)?)?;
    }
    // Through text, so the result is the closest f64 to the exact total.
    total.to_string().parse().ok()
}

/// Converts through the shortest decimal text of `value`, so `0.1` becomes exactly `0.1`.
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}
