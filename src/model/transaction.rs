use crate::model::{
    parse_amount, parse_date, RawRecord, Record, ACCOUNT_NAME, AMOUNT, CATEGORY, DATE,
    DATE_FORMAT, DESCRIPTION, LABELS, NOTES, ORIGINAL_DESCRIPTION, TRANSACTION_TYPE,
};
use crate::Result;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// A normalized Mint transaction: `Date` and `Amount` are parsed, every other field borrows its
/// text from the `RawRecord` it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transaction<'a> {
    #[serde(rename = "Date", serialize_with = "serialize_date")]
    date: NaiveDate,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Original Description")]
    original_description: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Transaction Type")]
    transaction_type: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Account Name")]
    account_name: &'a str,
    #[serde(rename = "Labels")]
    labels: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> Transaction<'a> {
    /// Converts a raw record into a typed transaction.
    ///
    /// # Errors
    /// - `Error::MissingField` if any of the nine Mint fields is absent.
    /// - `Error::Format` if `Date` is not `MM/DD/YYYY` or `Amount` is not a number.
    pub fn normalize(raw: &'a RawRecord) -> Result<Self> {
        let text = |name: &str| raw.get(name).ok_or_else(|| crate::Error::missing_field(name));
        Ok(Self {
            date: parse_date(text(DATE)?)?,
            description: text(DESCRIPTION)?,
            original_description: text(ORIGINAL_DESCRIPTION)?,
            amount: parse_amount(text(AMOUNT)?)?,
            transaction_type: text(TRANSACTION_TYPE)?,
            category: text(CATEGORY)?,
            account_name: text(ACCOUNT_NAME)?,
            labels: text(LABELS)?,
            notes: text(NOTES)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &'a str {
        self.description
    }

    pub fn original_description(&self) -> &'a str {
        self.original_description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn transaction_type(&self) -> &'a str {
        self.transaction_type
    }

    pub fn category(&self) -> &'a str {
        self.category
    }

    pub fn account_name(&self) -> &'a str {
        self.account_name
    }

    pub fn labels(&self) -> &'a str {
        self.labels
    }

    pub fn notes(&self) -> &'a str {
        self.notes
    }
}

impl<'a> TryFrom<&'a RawRecord> for Transaction<'a> {
    type Error = crate::Error;

    fn try_from(raw: &'a RawRecord) -> Result<Self> {
        Transaction::normalize(raw)
    }
}

/// `Date` reads back as `MM/DD/YYYY` and `Amount` as the shortest text that parses to the same
/// number, so `4.50` in the source reads back as `4.5`.
impl Record for Transaction<'_> {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value = match name {
            DATE => return Some(Cow::Owned(self.date.format(DATE_FORMAT).to_string())),
            AMOUNT => return Some(Cow::Owned(self.amount.to_string())),
            DESCRIPTION => self.description,
            ORIGINAL_DESCRIPTION => self.original_description,
            TRANSACTION_TYPE => self.transaction_type,
            CATEGORY => self.category,
            ACCOUNT_NAME => self.account_name,
            LABELS => self.labels,
            NOTES => self.notes,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn date(&self) -> Result<NaiveDate> {
        Ok(self.date)
    }

    fn amount(&self) -> Result<f64> {
        Ok(self.amount)
    }
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}
