use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::labeling::domain::cluster_labels::ClusterLabels;
use crate::labeling::domain::label_store::{LabelStore, LabelStoreError};

/// Cluster names kept in a pretty-printed JSON file.
pub struct JsonLabelStore {
    path: PathBuf,
}

impl JsonLabelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LabelStore for JsonLabelStore {
    fn load(&self) -> ClusterLabels {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return ClusterLabels::new(),
            Err(e) => {
                log::warn!("Could not read labels from {}: {e}", self.path.display());
                return ClusterLabels::new();
            }
        };

        match serde_json::from_str::<ClusterLabels>(&json) {
            Ok(labels) => {
                log::info!("Loaded {} label(s) from {}", labels.len(), self.path.display());
                labels
            }
            Err(e) => {
                log::warn!("Ignoring malformed labels file {}: {e}", self.path.display());
                ClusterLabels::new()
            }
        }
    }

    fn save(&self, labels: &ClusterLabels) -> Result<(), LabelStoreError> {
        let write_err = |source| LabelStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(labels).map_err(LabelStoreError::Serialize)?;
        fs::write(&self.path, json).map_err(write_err)?;

        log::info!("Saved {} label(s) to {}", labels.len(), self.path.display());
        Ok(())
    }
}
