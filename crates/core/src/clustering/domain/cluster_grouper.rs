use std::collections::BTreeMap;

use crate::clustering::domain::face_clusterer::ClusteringError;
use crate::shared::cluster_id::ClusterId;

/// Buckets `items` by the cluster id at the same position.
///
/// Items keep their relative order inside each bucket. Buckets iterate in
/// ascending id order, noise first.
pub fn group_by_cluster<T>(
    ids: &[ClusterId],
    items: Vec<T>,
) -> Result<BTreeMap<ClusterId, Vec<T>>, ClusteringError> {
    if ids.len() != items.len() {
        return Err(ClusteringError::LengthMismatch {
            ids: ids.len(),
            items: items.len(),
        });
    }

    let mut groups: BTreeMap<ClusterId, Vec<T>> = BTreeMap::new();
    for (id, item) in ids.iter().zip(items) {
        groups.entry(*id).or_default().push(item);
    }
    Ok(groups)
}
