use crate::model::{parse_amount, parse_date, Record, AMOUNT, DATE};
use crate::Result;
use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::Formatter;

/// A single named value in a `RawRecord`, for example `Category` = `Groceries`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Field {
    name: String,
    value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One line of a transaction export, as text, keyed by the header names.
///
/// Fields keep the order in which they were added, which for ingested records is the header order
/// of the source file. That order is also the order in which they are serialized. Records have
/// few fields, so lookups are a linear scan.
#[derive(Default, Debug, Clone, Eq, PartialEq, Hash)]
pub struct RawRecord {
    fields: Vec<Field>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs each header with the value in the same position. As with a zip, if one side is
    /// longer than the other, the extra items are ignored.
    pub fn zip<S1, S2, H, V>(headers: H, values: V) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        H: IntoIterator<Item = S1>,
        V: IntoIterator<Item = S2>,
    {
        headers.into_iter().zip(values).collect()
    }

    /// Sets `name` to `value`. An existing field keeps its position, a new one is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Record for RawRecord {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Cow::Borrowed)
    }

    fn date(&self) -> Result<NaiveDate> {
        parse_date(&self.require(DATE)?)
    }

    fn amount(&self) -> Result<f64> {
        parse_amount(&self.require(AMOUNT)?)
    }
}

impl Serialize for RawRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawRecordVisitor)
    }
}

struct RawRecordVisitor;

impl<'de> Visitor<'de> for RawRecordVisitor {
    type Value = RawRecord;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an object with string values")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = RawRecord {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            record.insert(name, value);
        }
        Ok(record)
    }
}
