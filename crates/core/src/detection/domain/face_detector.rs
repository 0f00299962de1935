use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Locates faces in a decoded photo.
///
/// Implementations may hold inference sessions that need mutable access,
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;
}
