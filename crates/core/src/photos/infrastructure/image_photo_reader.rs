use std::path::Path;

use crate::photos::domain::photo_reader::PhotoReader;
use crate::shared::frame::Frame;

/// Decodes photos with the `image` crate, converting every format to RGB8.
pub struct ImagePhotoReader;

impl ImagePhotoReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagePhotoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoReader for ImagePhotoReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height, 3))
    }
}
