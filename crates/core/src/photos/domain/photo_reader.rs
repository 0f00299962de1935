use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes a photo file into RGB pixels.
pub trait PhotoReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
