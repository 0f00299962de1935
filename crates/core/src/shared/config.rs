use std::path::PathBuf;

use thiserror::Error;

use crate::organizing::domain::file_action::FileAction;
use crate::shared::constants::{
    DEFAULT_LABELS_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_UNKNOWN_LABEL, IMAGE_EXTENSIONS,
};

pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;
pub const DEFAULT_DETECTION_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_NUM_JITTERS: usize = 1;
pub const DEFAULT_BATCH_SIZE: usize = 32;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("cluster_threshold must be in (0, 1], got {0}")]
    ClusterThreshold(f64),
    #[error("cluster_min_samples must be >= 1, got {0}")]
    MinSamples(usize),
    #[error("detection_confidence must be between 0.0 and 1.0, got {0}")]
    DetectionConfidence(f64),
    #[error("encoding_num_jitters must be >= 1, got {0}")]
    NumJitters(usize),
    #[error("batch_size must be >= 1, got {0}")]
    BatchSize(usize),
    #[error("unknown_label must not be empty")]
    EmptyUnknownLabel,
    #[error("file_action must be 'copy' or 'move', got '{0}'")]
    FileAction(String),
}

/// Every knob the organizing pipeline reads, passed explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizerConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// DBSCAN `eps`: lower is stricter.
    pub cluster_threshold: f64,
    /// DBSCAN `min_samples`, counting the point itself.
    pub cluster_min_samples: usize,
    pub file_action: FileAction,
    pub unknown_label: String,
    pub labels_file: PathBuf,
    pub detection_confidence: f64,
    pub encoding_num_jitters: usize,
    /// Photos scanned between progress reports.
    pub batch_size: usize,
    pub image_extensions: Vec<String>,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("photos"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            cluster_min_samples: DEFAULT_MIN_CLUSTER_SIZE,
            file_action: FileAction::Copy,
            unknown_label: DEFAULT_UNKNOWN_LABEL.to_string(),
            labels_file: PathBuf::from(DEFAULT_LABELS_FILE),
            detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            encoding_num_jitters: DEFAULT_NUM_JITTERS,
            batch_size: DEFAULT_BATCH_SIZE,
            image_extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl OrganizerConfig {
    /// Checks every range constraint. The pipeline assumes a validated
    /// config and does not re-check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cluster_threshold > 0.0 && self.cluster_threshold <= 1.0) {
            return Err(ConfigError::ClusterThreshold(self.cluster_threshold));
        }
        if self.cluster_min_samples < 1 {
            return Err(ConfigError::MinSamples(self.cluster_min_samples));
        }
        if !(0.0..=1.0).contains(&self.detection_confidence) {
            return Err(ConfigError::DetectionConfidence(self.detection_confidence));
        }
        if self.encoding_num_jitters < 1 {
            return Err(ConfigError::NumJitters(self.encoding_num_jitters));
        }
        if self.batch_size < 1 {
            return Err(ConfigError::BatchSize(self.batch_size));
        }
        if self.unknown_label.trim().is_empty() {
            return Err(ConfigError::EmptyUnknownLabel);
        }
        Ok(())
    }
}
