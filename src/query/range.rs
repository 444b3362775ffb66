//! Inclusive date range filtering.

use crate::model::{parse_date_named, Record};
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// An inclusive range of dates. Either end may be left open.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }
}

impl DateRange {
    /// `None` means unbounded on that side.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            end: end.unwrap_or(NaiveDate::MAX),
        }
    }

    /// Builds a range from optional `MM/DD/YYYY` strings.
    ///
    /// # Errors
    /// `Error::Format` if a supplied bound is not a valid `MM/DD/YYYY` date.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(|s| parse_date_named("start date", s)).transpose()?;
        let end = end.map(|s| parse_date_named("end date", s)).transpose()?;
        Ok(Self::new(start, end))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start == NaiveDate::MIN && self.end == NaiveDate::MAX
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Keeps the records whose date falls in this range, in their original order.
    pub fn filter<I, R>(&self, records: I) -> Result<Vec<R>>
    where
        I: IntoIterator<Item = R>,
        R: Record,
    {
        let mut kept = Vec::new();
        for record in records {
            if self.contains(record.date()?) {
                kept.push(record);
            }
        }
        trace!(
            "date range {} to {} kept {} records",
            self.start,
            self.end,
            kept.len()
        );
        Ok(kept)
    }
}

/// Keeps the records dated between `start_date` and `end_date`, both inclusive and both in
/// `MM/DD/YYYY` format. A missing bound leaves that side of the range open.
///
/// # Errors
/// `Error::Format` if a bound or any record's `Date` does not parse, `Error::MissingField` if a
/// record has no `Date`.
pub fn filter_by_date_range<I, R>(
    records: I,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<R>>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    DateRange::parse(start_date, end_date)?.filter(records)
}
