//! Partitioning records into groups by a field value or by calendar month.

use crate::model::{Record, YearMonth};
use crate::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

/// Records partitioned by key.
///
/// Groups are kept in the order in which their key was first seen, and the members of a group
/// are kept in the order in which they were added. Every record added is in exactly one group.
#[derive(Debug, Clone)]
pub struct Groups<K, R> {
    groups: Vec<(K, Vec<R>)>,
    index: HashMap<K, usize>,
}

impl<K, R> Default for Groups<K, R> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: PartialEq, R: PartialEq> PartialEq for Groups<K, R> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<K: Eq, R: Eq> Eq for Groups<K, R> {}

impl<K, R> Groups<K, R>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the group for `key`, creating the group if this is a new key.
    pub fn push(&mut self, key: K, record: R) {
        match self.index.get(&key) {
            Some(&ix) => self.groups[ix].1.push(record),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![record]));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[R]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&ix| self.groups[ix].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[R])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(k, _)| k)
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The number of records across all groups.
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn into_vec(self) -> Vec<(K, Vec<R>)> {
        self.groups
    }
}

impl<K, R> IntoIterator for Groups<K, R> {
    type Item = (K, Vec<R>);
    type IntoIter = std::vec::IntoIter<(K, Vec<R>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Serializes as a map from key to members, in group order.
impl<K, R> Serialize for Groups<K, R>
where
    K: Serialize,
    R: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, members) in &self.groups {
            map.serialize_entry(key, members)?;
        }
        map.end()
    }
}

/// Groups records by a key computed from each record.
///
/// # Errors
/// Whatever `key_of` returns. No groups are returned if it fails for any record.
pub fn group_by_key<I, R, K, F>(records: I, mut key_of: F) -> Result<Groups<K, R>>
where
    I: IntoIterator<Item = R>,
    K: Eq + Hash + Clone,
    F: FnMut(&R) -> Result<K>,
{
    let mut groups = Groups::new();
    for record in records {
        let key = key_of(&record)?;
        groups.push(key, record);
    }
    trace!(
        "grouped {} records into {} groups",
        groups.total_len(),
        groups.len()
    );
    Ok(groups)
}

/// Groups records by the exact value of `field`.
///
/// # Errors
/// `Error::MissingField` if a record has no field named `field`.
pub fn group_by<I, R>(records: I, field: &str) -> Result<Groups<String, R>>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    group_by_key(records, |record| Ok(record.require(field)?.into_owned()))
}

/// Groups records by the calendar month of their `Date`.
///
/// # Errors
/// `Error::Format` if a record's `Date` is not `MM/DD/YYYY`, `Error::MissingField` if it has none.
pub fn group_by_month<I, R>(records: I) -> Result<Groups<YearMonth, R>>
where
    I: IntoIterator<Item = R>,
    R: Record,
{
    group_by_key(records, |record| Ok(YearMonth::from_date(record.date()?)))
}
