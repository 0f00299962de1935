use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Persisted cluster names, keyed by the decimal cluster index.
///
/// Serializes as a flat JSON object so the file stays hand-editable.
/// Keys that are not cluster indices (e.g. added by hand) are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterLabels {
    entries: BTreeMap<String, String>,
}

impl ClusterLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cluster: usize) -> Option<&str> {
        self.entries.get(&cluster.to_string()).map(String::as_str)
    }

    pub fn insert(&mut self, cluster: usize, name: impl Into<String>) {
        self.entries.insert(cluster.to_string(), name.into());
    }

    /// Distinct names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for ClusterLabels {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        let mut labels = Self::new();
        for (cluster, name) in iter {
            labels.insert(cluster, name);
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut labels = ClusterLabels::new();
        labels.insert(3, "Alice");
        assert_eq!(labels.get(3), Some("Alice"));
        assert_eq!(labels.get(4), None);
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_names_are_distinct_and_sorted() {
        let labels: ClusterLabels = [(0, "Bob"), (1, "Alice"), (2, "Bob")].into_iter().collect();
        assert_eq!(labels.names(), vec!["Alice".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let labels: ClusterLabels = [(0, "Alice"), (1, "Bob")].into_iter().collect();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"0":"Alice","1":"Bob"}"#);
    }

    #[test]
    fn test_deserializes_hand_edited_keys() {
        let labels: ClusterLabels =
            serde_json::from_str(r#"{"2": "Carol", "note": "kept"}"#).unwrap();
        assert_eq!(labels.get(2), Some("Carol"));
        assert_eq!(labels.len(), 2);
    }
}
