use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::labeling::domain::label_prompt::{ClusterPreview, LabelPrompt};
use crate::labeling::domain::label_store::{LabelStore, LabelStoreError};
use crate::shared::cluster_id::ClusterId;
use crate::shared::constants::{auto_label, MAX_PROMPT_SAMPLES};

/// Turns numeric clusters into named groups.
///
/// Names come from the store when known, otherwise from the prompt (when
/// one is given) or are generated as `person_<n>`. Noise always maps to
/// the unknown label and is never stored.
pub struct Labeler {
    store: Box<dyn LabelStore>,
    unknown_label: String,
}

impl Labeler {
    pub fn new(store: Box<dyn LabelStore>, unknown_label: impl Into<String>) -> Self {
        Self {
            store,
            unknown_label: unknown_label.into(),
        }
    }

    /// Names every group and merges groups that end up with the same name.
    ///
    /// Clusters are visited in ascending order. Passing a prompt makes the
    /// run interactive. The store is rewritten at the end even when
    /// nothing new was named.
    pub fn assign_labels(
        &self,
        groups: BTreeMap<ClusterId, Vec<PathBuf>>,
        mut prompt: Option<&mut dyn LabelPrompt>,
    ) -> Result<BTreeMap<String, Vec<PathBuf>>, LabelStoreError> {
        let mut saved = self.store.load();
        let mut labeled: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for (cluster, paths) in groups {
            let label = match cluster {
                ClusterId::Noise => self.unknown_label.clone(),
                ClusterId::Cluster(idx) => match saved.get(idx) {
                    Some(name) => name.to_string(),
                    None => {
                        let name = match prompt.as_deref_mut() {
                            Some(p) => {
                                let known = saved.names();
                                let preview = ClusterPreview {
                                    cluster: idx,
                                    photo_count: paths.len(),
                                    samples: &paths[..paths.len().min(MAX_PROMPT_SAMPLES)],
                                    known_labels: &known,
                                };
                                p.ask(&preview)
                                    .map(|n| n.trim().to_string())
                                    .filter(|n| !n.is_empty())
                                    .unwrap_or_else(|| auto_label(idx))
                            }
                            None => auto_label(idx),
                        };
                        log::debug!("Cluster {idx} named '{name}'");
                        saved.insert(idx, name.clone());
                        name
                    }
                },
            };
            log::debug!("Cluster {cluster}: {} photo(s) -> '{label}'", paths.len());
            labeled.entry(label).or_default().extend(paths);
        }

        self.store.save(&saved)?;
        Ok(labeled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::domain::cluster_labels::ClusterLabels;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    #[derive(Clone, Default)]
    struct MemoryStore {
        labels: Arc<Mutex<ClusterLabels>>,
        saves: Arc<Mutex<usize>>,
    }

    impl MemoryStore {
        fn with(labels: ClusterLabels) -> Self {
            Self {
                labels: Arc::new(Mutex::new(labels)),
                saves: Arc::default(),
            }
        }

        fn snapshot(&self) -> ClusterLabels {
            self.labels.lock().unwrap().clone()
        }
    }

    impl LabelStore for MemoryStore {
        fn load(&self) -> ClusterLabels {
            self.snapshot()
        }

        fn save(&self, labels: &ClusterLabels) -> Result<(), LabelStoreError> {
            *self.labels.lock().unwrap() = labels.clone();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct ScriptedPrompt {
        answers: VecDeque<Option<String>>,
        asked: Vec<(usize, usize, Vec<PathBuf>, Vec<String>)>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl LabelPrompt for ScriptedPrompt {
        fn ask(&mut self, preview: &ClusterPreview<'_>) -> Option<String> {
            self.asked.push((
                preview.cluster,
                preview.photo_count,
                preview.samples.to_vec(),
                preview.known_labels.to_vec(),
            ));
            self.answers.pop_front().flatten()
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn sample_groups() -> BTreeMap<ClusterId, Vec<PathBuf>> {
        BTreeMap::from([
            (ClusterId::Cluster(0), paths(&["a.jpg"])),
            (ClusterId::Cluster(1), paths(&["b.jpg"])),
            (ClusterId::Noise, paths(&["c.jpg"])),
        ])
    }

    #[test]
    fn test_non_interactive_generates_names() {
        let store = MemoryStore::default();
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");

        let result = labeler.assign_labels(sample_groups(), None).unwrap();

        assert_eq!(result["person_0"], paths(&["a.jpg"]));
        assert_eq!(result["person_1"], paths(&["b.jpg"]));
        assert_eq!(result["unknown"], paths(&["c.jpg"]));
        assert_eq!(store.snapshot().get(0), Some("person_0"));
    }

    #[test]
    fn test_noise_is_never_persisted() {
        let store = MemoryStore::default();
        let labeler = Labeler::new(Box::new(store.clone()), "strangers");

        let groups = BTreeMap::from([(ClusterId::Noise, paths(&["x.jpg"]))]);
        let result = labeler.assign_labels(groups, None).unwrap();

        assert_eq!(result["strangers"], paths(&["x.jpg"]));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_uses_saved_labels() {
        let store = MemoryStore::with([(0, "Alice")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store), "unknown");

        let groups = BTreeMap::from([(ClusterId::Cluster(0), paths(&["a.jpg"]))]);
        let result = labeler.assign_labels(groups, None).unwrap();
        assert_eq!(result["Alice"], paths(&["a.jpg"]));
    }

    #[test]
    fn test_saved_label_skips_prompt() {
        let store = MemoryStore::with([(0, "Alice")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("Mallory")]);

        let groups = BTreeMap::from([(ClusterId::Cluster(0), paths(&["a.jpg"]))]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        assert!(result.contains_key("Alice"));
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_idempotent_for_known_ids() {
        let store = MemoryStore::with([(0, "Alice"), (1, "Bob")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");

        let first = labeler.assign_labels(sample_groups(), None).unwrap();
        let after_first = store.snapshot();
        let second = labeler.assign_labels(sample_groups(), None).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.snapshot(), after_first);
        assert_eq!(after_first.get(0), Some("Alice"));
        assert_eq!(after_first.get(1), Some("Bob"));
    }

    #[test]
    fn test_store_is_saved_even_without_new_labels() {
        let store = MemoryStore::with([(0, "Alice")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");

        let groups = BTreeMap::from([(ClusterId::Cluster(0), paths(&["a.jpg"]))]);
        labeler.assign_labels(groups, None).unwrap();
        assert_eq!(*store.saves.lock().unwrap(), 1);
    }

    #[test]
    fn test_interactive_prompt_names_cluster() {
        let store = MemoryStore::default();
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("Charlie")]);

        let groups = BTreeMap::from([(ClusterId::Cluster(0), paths(&["a.jpg"]))]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        assert!(result.contains_key("Charlie"));
        assert_eq!(store.snapshot().get(0), Some("Charlie"));
    }

    #[test]
    fn test_skipped_prompt_falls_back_to_auto_name() {
        let store = MemoryStore::default();
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");
        let mut prompt = ScriptedPrompt::new(&[None, Some("   ")]);

        let groups = BTreeMap::from([
            (ClusterId::Cluster(4), paths(&["a.jpg"])),
            (ClusterId::Cluster(7), paths(&["b.jpg"])),
        ]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        assert!(result.contains_key("person_4"));
        assert!(result.contains_key("person_7"));
        assert_eq!(store.snapshot().get(7), Some("person_7"));
    }

    #[test]
    fn test_prompt_answer_is_trimmed() {
        let labeler = Labeler::new(Box::new(MemoryStore::default()), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("  Dana \n")]);

        let groups = BTreeMap::from([(ClusterId::Cluster(0), paths(&["a.jpg"]))]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();
        assert!(result.contains_key("Dana"));
    }

    #[test]
    fn test_prompt_shows_at_most_five_samples() {
        let labeler = Labeler::new(Box::new(MemoryStore::default()), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("Eve")]);

        let many = paths(&["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "7.jpg"]);
        let groups = BTreeMap::from([(ClusterId::Cluster(0), many.clone())]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        let (cluster, count, samples, _) = &prompt.asked[0];
        assert_eq!(*cluster, 0);
        assert_eq!(*count, 7);
        assert_eq!(samples, &many[..5]);
        assert_eq!(result["Eve"].len(), 7);
    }

    #[test]
    fn test_prompt_sees_names_chosen_earlier_in_run() {
        let store = MemoryStore::with([(9, "Zed")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("Alice"), Some("Bob")]);

        let groups = BTreeMap::from([
            (ClusterId::Cluster(0), paths(&["a.jpg"])),
            (ClusterId::Cluster(1), paths(&["b.jpg"])),
        ]);
        labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        assert_eq!(prompt.asked[0].3, vec!["Zed".to_string()]);
        assert_eq!(prompt.asked[1].3, vec!["Alice".to_string(), "Zed".to_string()]);
    }

    #[test]
    fn test_same_name_merges_clusters() {
        let labeler = Labeler::new(Box::new(MemoryStore::default()), "unknown");
        let mut prompt = ScriptedPrompt::new(&[Some("Alice"), Some("Alice")]);

        let groups = BTreeMap::from([
            (ClusterId::Cluster(0), paths(&["a.jpg", "b.jpg"])),
            (ClusterId::Cluster(1), paths(&["c.jpg"])),
        ]);
        let result = labeler.assign_labels(groups, Some(&mut prompt)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result["Alice"], paths(&["a.jpg", "b.jpg", "c.jpg"]));
    }

    #[test]
    fn test_stored_duplicate_names_merge_clusters() {
        let store = MemoryStore::with([(0, "Alice"), (3, "Alice")].into_iter().collect());
        let labeler = Labeler::new(Box::new(store), "unknown");

        let groups = BTreeMap::from([
            (ClusterId::Cluster(0), paths(&["a.jpg"])),
            (ClusterId::Cluster(3), paths(&["d.jpg"])),
        ]);
        let result = labeler.assign_labels(groups, None).unwrap();
        assert_eq!(result["Alice"], paths(&["a.jpg", "d.jpg"]));
    }

    #[test]
    fn test_empty_groups_still_saves() {
        let store = MemoryStore::default();
        let labeler = Labeler::new(Box::new(store.clone()), "unknown");
        let result = labeler.assign_labels(BTreeMap::new(), None).unwrap();
        assert!(result.is_empty());
        assert_eq!(*store.saves.lock().unwrap(), 1);
    }
}
