//! Reference data attached to transaction actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One host-supplied row. Only rows of exactly `[name, value]` are used.
pub type ReferenceRow = Vec<String>;

/// Arbitrary name/value annotations carried by an action.
///
/// Serialized as a JSON object. A name supplied twice keeps the last value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceData(BTreeMap<String, String>);

impl ReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect fields from host rows, dropping every row that is not a pair.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ReferenceRow>,
    {
        let mut data = Self::new();
        for row in rows {
            if let [name, value] = row.as_slice() {
                data.insert(name.clone(), value.clone());
            }
        }
        data
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cols: &[&str]) -> ReferenceRow {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_pairs() {
        let rows = vec![
            row(&["invoice", "INV-7"]),
            row(&["lonely"]),
            row(&["a", "b", "c"]),
            row(&[]),
            row(&["memo", "rent"]),
        ];
        let data = ReferenceData::from_rows(&rows);
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("invoice"), Some("INV-7"));
        assert_eq!(data.get("memo"), Some("rent"));
        assert_eq!(data.get("lonely"), None);
    }

    #[test]
    fn duplicate_name_keeps_last() {
        let rows = vec![row(&["k", "first"]), row(&["k", "second"])];
        let data = ReferenceData::from_rows(&rows);
        assert_eq!(data.get("k"), Some("second"));
    }

    #[test]
    fn serializes_as_object() {
        let mut data = ReferenceData::new();
        data.insert("memo", "rent");
        assert_eq!(serde_json::to_value(&data).unwrap(), serde_json::json!({"memo": "rent"}));
    }
}
