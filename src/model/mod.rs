//! Types that represent the core data model, such as `RawRecord` and `Transaction`.
mod amount;
mod date;
mod raw;
mod transaction;

pub use amount::{display_amount, parse_amount};
pub use date::{parse_date, YearMonth, DATE_FORMAT};
pub(crate) use date::parse_date_named;
pub use raw::{Field, RawRecord};
pub use transaction::Transaction;

use crate::Result;
use chrono::NaiveDate;
use std::borrow::Cow;

// "Date","Description","Original Description","Amount","Transaction Type","Category","Account Name","Labels","Notes"
pub const DATE: &str = "Date";
pub const DESCRIPTION: &str = "Description";
pub const ORIGINAL_DESCRIPTION: &str = "Original Description";
pub const AMOUNT: &str = "Amount";
pub const TRANSACTION_TYPE: &str = "Transaction Type";
pub const CATEGORY: &str = "Category";
pub const ACCOUNT_NAME: &str = "Account Name";
pub const LABELS: &str = "Labels";
pub const NOTES: &str = "Notes";

/// The headers of a Mint transaction export, in the order Mint writes them.
pub const MINT_HEADERS: [&str; 9] = [
    DATE,
    DESCRIPTION,
    ORIGINAL_DESCRIPTION,
    AMOUNT,
    TRANSACTION_TYPE,
    CATEGORY,
    ACCOUNT_NAME,
    LABELS,
    NOTES,
];

/// Anything that can be filtered, grouped, summed or bucketed.
///
/// Both `RawRecord` and `Transaction` implement this, as does a reference to anything that
/// implements it, so the query operations can be chained over borrowed results.
pub trait Record {
    /// The value of the field named `name` as text, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;

    /// The transaction date.
    fn date(&self) -> Result<NaiveDate>;

    /// The transaction amount.
    fn amount(&self) -> Result<f64>;

    /// Like `field`, but a missing field is an error.
    fn require(&self, name: &str) -> Result<Cow<'_, str>> {
        self.field(name)
            .ok_or_else(|| crate::Error::missing_field(name))
    }
}

impl<R> Record for &R
where
    R: Record + ?Sized,
{
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).field(name)
    }

    fn date(&self) -> Result<NaiveDate> {
        (**self).date()
    }

    fn amount(&self) -> Result<f64> {
        (**self).amount()
    }
}
