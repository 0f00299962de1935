use std::path::PathBuf;

/// What the user sees when asked to name a cluster.
#[derive(Debug)]
pub struct ClusterPreview<'a> {
    pub cluster: usize,
    pub photo_count: usize,
    pub samples: &'a [PathBuf],
    pub known_labels: &'a [String],
}

/// Asks a person to name a cluster.
pub trait LabelPrompt {
    /// `None` means skipped (empty answer, end of input, or interruption).
    fn ask(&mut self, preview: &ClusterPreview<'_>) -> Option<String>;
}
