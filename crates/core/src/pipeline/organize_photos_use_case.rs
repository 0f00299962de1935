use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::clustering::domain::cluster_grouper::group_by_cluster;
use crate::clustering::domain::face_clusterer::FaceClusterer;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::detection::domain::primary_face::select_primary;
use crate::labeling::domain::label_prompt::LabelPrompt;
use crate::labeling::domain::labeler::Labeler;
use crate::organizing::domain::photo_organizer::PhotoOrganizer;
use crate::photos::domain::photo_reader::PhotoReader;
use crate::shared::embedding::Embedding;
use crate::shared::photo_record::PhotoRecord;

/// Photo organizing pipeline: scan → cluster → group → label → organize.
///
/// Scanning reads each photo, detects faces and keeps the embedding of the
/// largest one. Photos that fail to decode, or show no face, drop out.
pub struct OrganizePhotosUseCase {
    reader: Box<dyn PhotoReader>,
    detector: Box<dyn FaceDetector>,
    encoder: Box<dyn FaceEncoder>,
    clusterer: Box<dyn FaceClusterer>,
    labeler: Labeler,
    organizer: Box<dyn PhotoOrganizer>,
    batch_size: usize,
    on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
}

impl OrganizePhotosUseCase {
    /// `batch_size` is the number of photos between progress log lines.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reader: Box<dyn PhotoReader>,
        detector: Box<dyn FaceDetector>,
        encoder: Box<dyn FaceEncoder>,
        clusterer: Box<dyn FaceClusterer>,
        labeler: Labeler,
        organizer: Box<dyn PhotoOrganizer>,
        batch_size: usize,
        on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    ) -> Self {
        Self {
            reader,
            detector,
            encoder,
            clusterer,
            labeler,
            organizer,
            batch_size: batch_size.max(1),
            on_progress,
        }
    }

    /// Runs the whole pipeline over `photos`.
    ///
    /// Returns label → output directory. When no photo yields a face the
    /// result is empty and neither the label store nor the output tree is
    /// touched. Passing a prompt makes labeling interactive.
    pub fn execute(
        &mut self,
        photos: &[PathBuf],
        prompt: Option<&mut dyn LabelPrompt>,
    ) -> Result<BTreeMap<String, PathBuf>, Box<dyn std::error::Error>> {
        let records = self.scan(photos)?;
        if records.is_empty() {
            log::warn!("No faces detected, nothing to organize");
            return Ok(BTreeMap::new());
        }

        let (paths, embeddings): (Vec<PathBuf>, Vec<Embedding>) = records
            .into_iter()
            .map(|record| (record.path, record.embedding))
            .unzip();

        let ids = self.clusterer.cluster(&embeddings)?;
        let groups = group_by_cluster(&ids, paths)?;
        let named = self.labeler.assign_labels(groups, prompt)?;
        let result = self.organizer.organize(&named)?;

        log::info!("Done, organized into {} group(s)", result.len());
        Ok(result)
    }

    /// Produces at most one [`PhotoRecord`] per photo, in input order.
    pub fn scan(
        &mut self,
        photos: &[PathBuf],
    ) -> Result<Vec<PhotoRecord>, Box<dyn std::error::Error>> {
        let total = photos.len();
        let mut records = Vec::new();

        for (i, path) in photos.iter().enumerate() {
            if let Some(record) = self.scan_photo(path)? {
                records.push(record);
            }

            let current = i + 1;
            if current % self.batch_size == 0 || current == total {
                log::info!("Processing {current} / {total}");
            }
            self.report_progress(current, total)?;
        }

        log::info!("Detected faces in {} / {total} image(s)", records.len());
        Ok(records)
    }

    fn scan_photo(
        &mut self,
        path: &Path,
    ) -> Result<Option<PhotoRecord>, Box<dyn std::error::Error>> {
        let frame = match self.reader.read(path) {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                return Ok(None);
            }
        };

        let boxes = self.detector.detect(&frame)?;
        let Some(primary) = select_primary(&boxes) else {
            log::debug!("No face in {}", path.display());
            return Ok(None);
        };
        let bounding_box = boxes[primary];
        if bounding_box.area() == 0 {
            log::debug!("Only degenerate face boxes in {}", path.display());
            return Ok(None);
        }

        // Only the primary face is ever used, so only it is encoded.
        let Some(embedding) = self
            .encoder
            .encode(&frame, std::slice::from_ref(&bounding_box))?
            .into_iter()
            .next()
        else {
            log::debug!("No embedding for the face in {}", path.display());
            return Ok(None);
        };

        log::debug!(
            "{}: {} face(s), primary {}x{}",
            path.display(),
            boxes.len(),
            bounding_box.width(),
            bounding_box.height()
        );
        Ok(Some(PhotoRecord {
            path: path.to_path_buf(),
            embedding,
            bounding_box,
        }))
    }

    fn report_progress(
        &self,
        current: usize,
        total: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref callback) = self.on_progress {
            if !callback(current, total) {
                return Err("Cancelled".into());
            }
        }
        Ok(())
    }
}
