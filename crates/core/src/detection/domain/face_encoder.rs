use crate::shared::bounding_box::BoundingBox;
use crate::shared::embedding::Embedding;
use crate::shared::frame::Frame;

/// Computes one appearance embedding per face.
///
/// The returned list is index-aligned with `boxes`.
pub trait FaceEncoder: Send {
    fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Embedding>, Box<dyn std::error::Error>>;
}
