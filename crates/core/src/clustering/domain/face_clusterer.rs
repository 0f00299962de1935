use thiserror::Error;

use crate::shared::cluster_id::ClusterId;
use crate::shared::embedding::Embedding;

#[derive(Error, Debug, PartialEq)]
pub enum ClusteringError {
    #[error("embedding {index} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("{ids} cluster ids cannot be paired with {items} items")]
    LengthMismatch { ids: usize, items: usize },
}

/// Partitions embeddings into identity clusters.
///
/// Returns one [`ClusterId`] per input, in input order. Only the
/// partition is meaningful; the numbers assigned to clusters are not.
pub trait FaceClusterer: Send {
    fn cluster(&self, embeddings: &[Embedding]) -> Result<Vec<ClusterId>, ClusteringError>;
}
