//! Histogram-style binning of records by amount.

use crate::model::Record;
use crate::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use tracing::trace;

/// The amount interval covered by one bin. `None` means unbounded on that side.
///
/// The lower bound is inclusive and the upper bound exclusive: `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Interval {
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.lower.map_or(true, |lower| lower <= amount)
            && self.upper.map_or(true, |upper| amount < upper)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.lower, self.upper) {
            (None, None) => write!(f, "(-inf, +inf)"),
            (None, Some(upper)) => write!(f, "(-inf, {upper})"),
            (Some(lower), None) => write!(f, "[{lower}, +inf)"),
            (Some(lower), Some(upper)) => write!(f, "[{lower}, {upper})"),
        }
    }
}

/// Records sorted into consecutive amount intervals.
///
/// With edges `e0 < e1 < ... < e(n-1)` there are `n + 1` bins:
/// `(-inf, e0), [e0, e1), ..., [e(n-1), +inf)`. Together they hold every input record once.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins<R> {
    edges: Vec<f64>,
    bins: Vec<Vec<R>>,
}

impl<R> Bins<R> {
    /// The distinct edges, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// The number of bins, which is always one more than the number of edges.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false, there is at least one bin. Provided alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn get(&self, ix: usize) -> Option<&[R]> {
        self.bins.get(ix).map(Vec::as_slice)
    }

    pub fn interval(&self, ix: usize) -> Interval {
        let lower = ix.checked_sub(1).and_then(|i| self.edges.get(i)).copied();
        let upper = self.edges.get(ix).copied();
        Interval { lower, upper }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Interval, &[R])> {
        self.bins
            .iter()
            .enumerate()
            .map(|(ix, members)| (self.interval(ix), members.as_slice()))
    }

    pub fn into_vec(self) -> Vec<Vec<R>> {
        self.bins
    }

    fn index_of(&self, amount: f64) -> usize {
        match self.edges.last() {
            None => 0,
            Some(&max) if amount >= max => self.edges.len(),
            Some(_) => self
                .edges
                .iter()
                .position(|&edge| amount < edge)
                .unwrap_or(self.edges.len()),
        }
    }
}

#[derive(Serialize)]
struct BinOut<'a, R> {
    range: String,
    lower: Option<f64>,
    upper: Option<f64>,
    records: &'a [R],
}

/// Serializes as an array of `{ "range", "lower", "upper", "records" }` objects, lowest bin first.
impl<R> Serialize for Bins<R>
where
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.bins.len()))?;
        for (interval, records) in self.iter() {
            seq.serialize_element(&BinOut {
                range: interval.to_string(),
                lower: interval.lower,
                upper: interval.upper,
                records,
            })?;
        }
        seq.end()
    }
}

/// Sorts records into bins by `Amount`.
///
/// `edges` may be in any order and may repeat; it is de-duplicated and sorted first. A record
/// whose amount is at or above the largest edge goes in the last bin. Otherwise it goes in the
/// first bin whose upper edge is strictly greater than the amount, so an amount equal to an edge
/// lands in the bin that starts at that edge. With no edges there is a single bin.
///
/// # Errors
/// - `Error::InvalidBinEdge` if an edge is NaN.
/// - `Error::Format` if an amount is not a number, `Error::MissingField` if a record has none.
pub fn bucketize_by_amount<I, R>(records: I, edges: &[f64]) -> Result<Bins<R>>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    if let Some(&edge) = edges.iter().find(|e| e.is_nan()) {
        return Err(Error::InvalidBinEdge { edge });
    }
    let mut edges = edges.to_vec();
    edges.sort_by(f64::total_cmp);
    edges.dedup();

    let mut bins = Bins {
        bins: (0..=edges.len()).map(|_| Vec::new()).collect(),
        edges,
    };
    for record in records {
        let ix = bins.index_of(record.amount()?);
        bins.bins[ix].push(record);
    }
    trace!(
        "bucketized records into {} bins with edges {:?}",
        bins.len(),
        bins.edges
    );
    Ok(bins)
}
