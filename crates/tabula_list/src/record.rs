use std::{collections::BTreeMap, sync::Arc};

use serde::Deserialize;

use crate::value::Value;

/// An entity shown as one row of a list view.
///
/// The list view never assumes a schema: it only asks records for the
/// value of a named field. Absent fields are reported as [`Value::Null`].
pub trait Record {
    fn field(&self, key: &str) -> Value;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Value {
        (**self).field(key)
    }
}

/// Derives the selection identifier of a record
pub type KeyExtractor<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Builds a [`KeyExtractor`] that uses the string form of `field`
#[must_use]
pub fn field_key<R: Record>(field: &str) -> KeyExtractor<R> {
    let field = field.to_string();
    Arc::new(move |record: &R| record.field(&field).to_string())
}

/// A record backed by a map from field name to value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct DynRecord {
    fields: BTreeMap<String, Value>,
}

impl DynRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for DynRecord {
    fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or_default()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for DynRecord {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DynRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
