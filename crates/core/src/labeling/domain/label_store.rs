use std::path::PathBuf;

use thiserror::Error;

use crate::labeling::domain::cluster_labels::ClusterLabels;

#[derive(Error, Debug)]
pub enum LabelStoreError {
    #[error("failed to serialize labels: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write labels to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistent cluster-name mapping.
///
/// `save` rewrites the whole mapping; with two concurrent writers the last
/// one wins.
pub trait LabelStore: Send {
    /// Missing or unreadable storage yields an empty mapping.
    fn load(&self) -> ClusterLabels;

    fn save(&self, labels: &ClusterLabels) -> Result<(), LabelStoreError>;
}
