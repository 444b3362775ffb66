use crate::model::DATE;
use crate::{Error, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The format of dates in a Mint export, e.g. `01/15/2020`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

const YEAR_MONTH_FORMAT: &str = "%Y-%m";

/// Parses a `Date` field value in `MM/DD/YYYY` format.
///
/// Values with the wrong separator, non-numeric parts, trailing text or an impossible calendar
/// date (e.g. `02/30/2020`) are format errors.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    parse_date_named(DATE, value)
}

/// Same as `parse_date`, but errors are reported against `field` rather than `Date`.
pub(crate) fn parse_date_named(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| Error::format(field, value, e))
}

/// A calendar month, used as the key when grouping transactions by month.
///
/// Internally this is the first day of the month, so it orders chronologically. It is displayed
/// and serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Returns `None` if `month` is not in `1..=12` or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(YearMonth)
    }

    /// The month that `date` falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date - Days::new(u64::from(date.day0())))
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        YearMonth::from_date(date) == *self
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth::from_date(date)
    }
}

impl From<YearMonth> for NaiveDate {
    fn from(value: YearMonth) -> Self {
        value.0
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.format(YEAR_MONTH_FORMAT), f)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|e| Error::format("month", s, e))?;
        Ok(YearMonth(date))
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        YearMonth::from_str(&s).map_err(serde::de::Error::custom)
    }
}
