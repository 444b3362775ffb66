//! Field-equality predicates and their ALL/ANY combination.

use crate::model::Record;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Tests whether a record's field has exactly the expected value.
///
/// The comparison is exact string equality: no trimming and no case folding.
///
/// # Example
/// ```
/// # use mint_tx::model::RawRecord;
/// # use mint_tx::query::Predicate;
/// let record = RawRecord::zip(["Category"], ["Groceries"]);
/// assert!(Predicate::new("Category", "Groceries").matches(&record).unwrap());
/// assert!(!Predicate::new("Category", "groceries").matches(&record).unwrap());
/// assert!(Predicate::new("Labels", "").matches(&record).is_err());
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Predicate {
    field: String,
    #[serde(rename = "value")]
    expected: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// # Errors
    /// `Error::MissingField` if the record has no field named `self.field()`.
    pub fn matches<R>(&self, record: &R) -> Result<bool>
    where
        R: Record + ?Sized,
    {
        Ok(record.require(&self.field)? == self.expected.as_str())
    }
}

/// How the results of several predicates are combined.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every predicate must match. With no predicates, every record is kept.
    #[default]
    All,
    /// At least one predicate must match. With no predicates, no record is kept.
    Any,
}

serde_plain::derive_display_from_serialize!(MatchMode);
serde_plain::derive_fromstr_from_deserialize!(MatchMode);

impl MatchMode {
    /// Evaluates every predicate against `record` and combines the results.
    ///
    /// All predicates are evaluated, even after the outcome is known, so that a predicate naming a
    /// missing field is always reported.
    pub fn evaluate<R>(self, predicates: &[Predicate], record: &R) -> Result<bool>
    where
        R: Record + ?Sized,
    {
        let mut hits = 0;
        for predicate in predicates {
            if predicate.matches(record)? {
                hits += 1;
            }
        }
        Ok(match self {
            MatchMode::All => hits == predicates.len(),
            MatchMode::Any => hits > 0,
        })
    }
}

/// Keeps the records for which `predicates`, combined according to `mode`, hold.
///
/// Records come out in the order they went in. Pass references to keep the originals.
///
/// # Errors
/// `Error::MissingField` if any predicate names a field that a record lacks. No output is
/// produced in that case.
pub fn filter_all<I, R>(records: I, predicates: &[Predicate], mode: MatchMode) -> Result<Vec<R>>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    let mut kept = Vec::new();
    let mut seen = 0usize;
    for record in records {
        seen += 1;
        if mode.evaluate(predicates, &record)? {
            kept.push(record);
        }
    }
    trace!(
        "filter_all ({mode}, {} predicates) kept {} of {seen} records",
        predicates.len(),
        kept.len()
    );
    Ok(kept)
}

/// A reusable group of predicates with the mode that combines them, e.g. "any of the food
/// categories". These are normally loaded from configuration, see `Config::presets`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PredicateSet {
    #[serde(default)]
    mode: MatchMode,
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new(mode: MatchMode, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            mode,
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Shorthand for a set where every predicate tests the same field.
    pub fn one_of<S>(field: &str, values: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self::new(
            MatchMode::Any,
            values.into_iter().map(|v| Predicate::new(field, v)),
        )
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches<R>(&self, record: &R) -> Result<bool>
    where
        R: Record + ?Sized,
    {
        self.mode.evaluate(&self.predicates, record)
    }

    pub fn filter<I, R>(&self, records: I) -> Result<Vec<R>>
    where
        I: IntoIterator<Item = R>,
        R: Record,
    {
        filter_all(records, &self.predicates, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, Transaction, ACCOUNT_NAME, AMOUNT, CATEGORY, DATE};
    use crate::test::{raw, sample_records};
    use crate::Error;
    use std::str::FromStr;

    fn records() -> Vec<RawRecord> {
        vec![
            raw("01/01/2020", "1.00", "Groceries", "Checking"),
            raw("01/02/2020", "2.00", "Restaurants", "Cash"),
            raw("01/03/2020", "3.00", "Groceries", "Venmo"),
            raw("01/04/2020", "4.00", "Gas & Fuel", "Checking"),
        ]
    }

    fn amounts(records: &[&RawRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get(AMOUNT).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_matches_exact() {
        let record = raw("01/01/2020", "1.00", "Groceries", "Checking");
        assert!(Predicate::new(CATEGORY, "Groceries").matches(&record).unwrap());
        assert!(!Predicate::new(CATEGORY, "Groceries ").matches(&record).unwrap());
        assert!(!Predicate::new(CATEGORY, "GROCERIES").matches(&record).unwrap());
    }

    #[test]
    fn test_matches_missing_field() {
        let record = RawRecord::zip([CATEGORY], ["Groceries"]);
        let e = Predicate::new(ACCOUNT_NAME, "Cash")
            .matches(&record)
            .unwrap_err();
        assert_eq!(
            e,
            Error::MissingField {
                field: ACCOUNT_NAME.to_string()
            }
        );
    }

    #[test]
    fn test_filter_all_mode() {
        let records = records();
        let predicates = vec![
            Predicate::new(CATEGORY, "Groceries"),
            Predicate::new(ACCOUNT_NAME, "Checking"),
        ];
        let kept = filter_all(&records, &predicates, MatchMode::All).unwrap();
        assert_eq!(amounts(&kept), vec!["1.00"]);
    }

    #[test]
    fn test_filter_any_mode() {
        let records = records();
        let predicates = vec![
            Predicate::new(ACCOUNT_NAME, "Cash"),
            Predicate::new(ACCOUNT_NAME, "Venmo"),
        ];
        let kept = filter_all(&records, &predicates, MatchMode::Any).unwrap();
        assert_eq!(amounts(&kept), vec!["2.00", "3.00"]);
    }

    #[test]
    fn test_filter_empty_predicates() {
        let records = records();
        let all = filter_all(&records, &[], MatchMode::All).unwrap();
        assert_eq!(all.len(), records.len());
        assert!(all.iter().zip(&records).all(|(a, b)| *a == b));
        let any = filter_all(&records, &[], MatchMode::Any).unwrap();
        assert!(any.is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = records();
        let predicates = vec![Predicate::new(CATEGORY, "Groceries")];
        let kept = filter_all(records.iter().rev(), &predicates, MatchMode::All).unwrap();
        assert_eq!(amounts(&kept), vec!["3.00", "1.00"]);
    }

    #[test]
    fn test_filter_missing_field_fails_whole_call() {
        let mut records = records();
        records.push(RawRecord::zip([CATEGORY], ["Groceries"]));
        let predicates = vec![Predicate::new(ACCOUNT_NAME, "Checking")];
        let e = filter_all(&records, &predicates, MatchMode::Any).unwrap_err();
        assert!(matches!(e, Error::MissingField { .. }));
    }

    #[test]
    fn test_missing_field_reported_after_decided_outcome() {
        // The first predicate already fails, the second names a missing field.
        let records = vec![RawRecord::zip([CATEGORY], ["Groceries"])];
        let predicates = vec![
            Predicate::new(CATEGORY, "Restaurants"),
            Predicate::new(ACCOUNT_NAME, "Cash"),
        ];
        assert!(filter_all(&records, &predicates, MatchMode::All).is_err());
    }

    #[test]
    fn test_filter_owned_records() {
        let predicates = vec![Predicate::new(CATEGORY, "Groceries")];
        let kept: Vec<RawRecord> = filter_all(records(), &predicates, MatchMode::All).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_transactions() {
        let records = sample_records();
        let txs = records
            .iter()
            .map(Transaction::normalize)
            .collect::<crate::Result<Vec<_>>>()
            .unwrap();
        let predicates = vec![Predicate::new(DATE, "02/01/2020")];
        let kept = filter_all(&txs, &predicates, MatchMode::All).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].description(), "Rent");
    }

    #[test]
    fn test_chained_filters() {
        let records = records();
        let groceries = filter_all(
            &records,
            &[Predicate::new(CATEGORY, "Groceries")],
            MatchMode::All,
        )
        .unwrap();
        let venmo = filter_all(
            groceries,
            &[Predicate::new(ACCOUNT_NAME, "Venmo")],
            MatchMode::All,
        )
        .unwrap();
        assert_eq!(amounts(&venmo), vec!["3.00"]);
    }

    #[test]
    fn test_match_mode_strings() {
        assert_eq!(MatchMode::All.to_string(), "all");
        assert_eq!(MatchMode::from_str("any").unwrap(), MatchMode::Any);
        assert!(MatchMode::from_str("some").is_err());
    }

    #[test]
    fn test_predicate_set() {
        let set = PredicateSet::one_of(ACCOUNT_NAME, ["Cash", "Venmo"]);
        assert_eq!(set.mode(), MatchMode::Any);
        assert_eq!(set.predicates().len(), 2);
        let records = records();
        let kept = set.filter(&records).unwrap();
        assert_eq!(amounts(&kept), vec!["2.00", "3.00"]);
        assert!(set.matches(&records[1]).unwrap());
        assert!(!set.matches(&records[0]).unwrap());
    }

    #[test]
    fn test_predicate_set_serde() {
        let json = r#"{"predicates":[{"field":"Category","value":"Snacks"}]}"#;
        let set: PredicateSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.mode(), MatchMode::All);
        assert_eq!(set.predicates(), &[Predicate::new(CATEGORY, "Snacks")]);
        let out = serde_json::to_string(&set).unwrap();
        assert_eq!(
            out,
            r#"{"mode":"all","predicates":[{"field":"Category","value":"Snacks"}]}"#
        );
    }
}
