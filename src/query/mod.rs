//! Operations over sequences of records: filtering, date ranges, sums, grouping and binning.
//!
//! Every operation accepts anything that iterates over `Record`s. Passing `&records` yields
//! references, and the output of one operation can be fed straight into the next:
//!
//! ```
//! # use mint_tx::model::{RawRecord, MINT_HEADERS, CATEGORY};
//! # use mint_tx::query::{filter_all, filter_by_date_range, sum_amounts, MatchMode, Predicate};
//! let records = vec![
//!     RawRecord::zip(MINT_HEADERS, ["01/15/2020", "Cafe", "CAFE", "4.50", "debit", "Coffee Shops", "Cash", "", ""]),
//!     RawRecord::zip(MINT_HEADERS, ["02/15/2020", "Cafe", "CAFE", "3.00", "debit", "Coffee Shops", "Cash", "", ""]),
//! ];
//! let coffee = filter_all(&records, &[Predicate::new(CATEGORY, "Coffee Shops")], MatchMode::All)?;
//! let january = filter_by_date_range(coffee, Some("01/01/2020"), Some("01/31/2020"))?;
//! assert_eq!(sum_amounts(january)?, 4.5);
//! # Ok::<(), mint_tx::Error>(())
//! ```
mod aggregate;
mod bucket;
mod group;
mod predicate;
mod range;

pub use aggregate::sum_amounts;
pub use bucket::{bucketize_by_amount, Bins, Interval};
pub use group::{group_by, group_by_key, group_by_month, Groups};
pub use predicate::{filter_all, MatchMode, Predicate, PredicateSet};
pub use range::{filter_by_date_range, DateRange};
