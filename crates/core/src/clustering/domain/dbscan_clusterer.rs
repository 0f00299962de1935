//! Density-based clustering (DBSCAN) over Euclidean distance.
//!
//! A point is *core* when at least `min_samples` points, itself included,
//! lie within `eps`. Clusters grow from core points through chains of
//! other core points; non-core points within reach join as border points.
//! Everything else is noise.

use std::collections::VecDeque;

use crate::clustering::domain::face_clusterer::{ClusteringError, FaceClusterer};
use crate::shared::cluster_id::ClusterId;
use crate::shared::embedding::Embedding;

#[derive(Clone, Debug)]
pub struct DbscanClusterer {
    eps: f64,
    min_samples: usize,
}

impl DbscanClusterer {
    /// `eps` is the maximum neighbor distance (inclusive); `min_samples`
    /// is clamped to at least 1.
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            eps,
            min_samples: min_samples.max(1),
        }
    }

    fn neighbors(&self, embeddings: &[Embedding], idx: usize) -> Vec<usize> {
        let point = &embeddings[idx];
        embeddings
            .iter()
            .enumerate()
            .filter(|(_, other)| point.euclidean_distance(other) <= self.eps)
            .map(|(i, _)| i)
            .collect()
    }
}

impl FaceClusterer for DbscanClusterer {
    fn cluster(&self, embeddings: &[Embedding]) -> Result<Vec<ClusterId>, ClusteringError> {
        if embeddings.is_empty() {
            return Ok(Vec::new());
        }
        check_dimensions(embeddings)?;

        let n = embeddings.len();
        let mut labels: Vec<Option<ClusterId>> = vec![None; n];
        let mut next_cluster = 0usize;

        for i in 0..n {
            if labels[i].is_some() {
                continue;
            }
            let seeds = self.neighbors(embeddings, i);
            if seeds.len() < self.min_samples {
                // May still be claimed as a border point later.
                labels[i] = Some(ClusterId::Noise);
                continue;
            }

            let cluster = ClusterId::Cluster(next_cluster);
            next_cluster += 1;
            labels[i] = Some(cluster);

            let mut queue: VecDeque<usize> = seeds.into_iter().filter(|&j| j != i).collect();
            while let Some(j) = queue.pop_front() {
                match labels[j] {
                    Some(ClusterId::Noise) => {
                        labels[j] = Some(cluster);
                        continue;
                    }
                    Some(ClusterId::Cluster(_)) => continue,
                    None => labels[j] = Some(cluster),
                }

                let reach = self.neighbors(embeddings, j);
                if reach.len() >= self.min_samples {
                    queue.extend(reach.into_iter().filter(|&k| {
                        !matches!(labels[k], Some(ClusterId::Cluster(_)))
                    }));
                }
            }
        }

        let ids: Vec<ClusterId> = labels
            .into_iter()
            .map(|l| l.unwrap_or(ClusterId::Noise))
            .collect();

        let noise = ids.iter().filter(|id| id.is_noise()).count();
        log::info!(
            "Clustering: {} clusters, {} noise faces out of {} total",
            next_cluster,
            noise,
            n
        );
        Ok(ids)
    }
}

fn check_dimensions(embeddings: &[Embedding]) -> Result<(), ClusteringError> {
    let expected = embeddings[0].dim();
    match embeddings.iter().position(|e| e.dim() != expected) {
        Some(index) => Err(ClusteringError::DimensionMismatch {
            index,
            expected,
            found: embeddings[index].dim(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// Deterministic pseudo-random vector (xorshift), values in [-1, 1).
    fn noisy(seed: u64, dim: usize, spread: f32, offset: f32) -> Embedding {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        let values = (0..dim)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                (unit as f32 * 2.0 - 1.0) * spread + offset
            })
            .collect();
        Embedding::new(values)
    }

    fn point(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec())
    }

    fn non_noise(ids: &[ClusterId]) -> HashSet<ClusterId> {
        ids.iter().copied().filter(|id| !id.is_noise()).collect()
    }

    #[test]
    fn test_empty_input() {
        let ids = DbscanClusterer::new(0.6, 2).cluster(&[]).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_two_tight_clusters() {
        let mut embeddings: Vec<Embedding> = (0..5).map(|s| noisy(s, 128, 0.01, 0.0)).collect();
        embeddings.extend((5..10).map(|s| noisy(s, 128, 0.01, 10.0)));

        let ids = DbscanClusterer::new(0.6, 2).cluster(&embeddings).unwrap();

        assert_eq!(ids.len(), 10);
        assert_eq!(non_noise(&ids).len(), 2);
        assert!(ids[..5].iter().all(|id| *id == ids[0]));
        assert!(ids[5..].iter().all(|id| *id == ids[5]));
        assert_ne!(ids[0], ids[5]);
    }

    #[test]
    fn test_all_noise_when_spread() {
        let embeddings: Vec<Embedding> = (0..5).map(|s| noisy(s, 128, 100.0, 0.0)).collect();
        let ids = DbscanClusterer::new(0.01, 5).cluster(&embeddings).unwrap();
        assert!(ids.iter().all(|id| id.is_noise()));
    }

    #[test]
    fn test_min_samples_above_set_size_is_all_noise() {
        let embeddings = vec![point(&[0.0]), point(&[0.0]), point(&[0.0])];
        let ids = DbscanClusterer::new(0.5, 4).cluster(&embeddings).unwrap();
        assert!(ids.iter().all(|id| id.is_noise()));
    }

    #[test]
    fn test_min_samples_one_makes_every_point_a_cluster() {
        let embeddings = vec![point(&[0.0]), point(&[5.0]), point(&[10.0])];
        let ids = DbscanClusterer::new(1.0, 1).cluster(&embeddings).unwrap();
        assert_eq!(non_noise(&ids).len(), 3);
    }

    #[test]
    fn test_eps_is_inclusive() {
        let embeddings = vec![point(&[0.0]), point(&[0.5])];
        let ids = DbscanClusterer::new(0.5, 2).cluster(&embeddings).unwrap();
        assert!(!ids[0].is_noise());
        assert_eq!(ids[0], ids[1]);
    }

    #[test]
    fn test_chain_of_core_points_forms_one_cluster() {
        // Ends are 1.2 apart but connected through the middle points.
        let embeddings = vec![
            point(&[0.0]),
            point(&[0.4]),
            point(&[0.8]),
            point(&[1.2]),
        ];
        let ids = DbscanClusterer::new(0.45, 2).cluster(&embeddings).unwrap();
        assert_eq!(non_noise(&ids).len(), 1);
        assert!(ids.iter().all(|id| !id.is_noise()));
    }

    #[test]
    fn test_border_point_joins_cluster_but_does_not_extend_it() {
        // 0,1,2 dense; 3 reachable only from 2; 4 reachable only from 3.
        let embeddings = vec![
            point(&[0.0]),
            point(&[0.1]),
            point(&[0.2]),
            point(&[0.65]),
            point(&[1.2]),
        ];
        let ids = DbscanClusterer::new(0.5, 3).cluster(&embeddings).unwrap();
        assert_eq!(ids[3], ids[0]);
        assert!(!ids[3].is_noise());
        assert!(ids[4].is_noise());
    }

    #[test]
    fn test_point_visited_as_noise_is_later_claimed_as_border() {
        // The border point comes first in input order.
        let embeddings = vec![
            point(&[0.65]),
            point(&[0.0]),
            point(&[0.1]),
            point(&[0.2]),
        ];
        let ids = DbscanClusterer::new(0.5, 3).cluster(&embeddings).unwrap();
        assert!(ids.iter().all(|id| *id == ids[1]));
        assert!(!ids[1].is_noise());
    }

    #[test]
    fn test_outlier_is_noise() {
        let embeddings = vec![point(&[0.0]), point(&[0.1]), point(&[9.0])];
        let ids = DbscanClusterer::new(0.5, 2).cluster(&embeddings).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert!(ids[2].is_noise());
    }

    #[test]
    fn test_membership_is_deterministic() {
        let embeddings: Vec<Embedding> = (0..20)
            .map(|s| noisy(s, 16, 0.05, (s % 3) as f32))
            .collect();
        let clusterer = DbscanClusterer::new(0.6, 2);
        let first = clusterer.cluster(&embeddings).unwrap();
        let second = clusterer.cluster(&embeddings).unwrap();
        assert_eq!(first, second);

        let mut by_offset: HashMap<u64, ClusterId> = HashMap::new();
        for (s, id) in first.iter().enumerate() {
            let expected = *by_offset.entry(s as u64 % 3).or_insert(*id);
            assert_eq!(*id, expected);
        }
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let embeddings = vec![point(&[0.0, 1.0]), point(&[0.0])];
        let err = DbscanClusterer::new(0.5, 2).cluster(&embeddings).unwrap_err();
        assert_eq!(
            err,
            ClusteringError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            }
        );
    }
}
