use std::path::PathBuf;

use crate::shared::bounding_box::BoundingBox;
use crate::shared::embedding::Embedding;

/// The primary face of one photo: where it is and what it looks like.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoRecord {
    pub path: PathBuf,
    pub embedding: Embedding,
    pub bounding_box: BoundingBox,
}
