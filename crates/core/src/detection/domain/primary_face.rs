use crate::shared::bounding_box::BoundingBox;

/// Index of the face that represents the photo: the largest box by area.
///
/// Ties go to the earliest box. `None` for a photo with no faces.
pub fn select_primary(boxes: &[BoundingBox]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (idx, b) in boxes.iter().enumerate() {
        let area = b.area();
        if best.map_or(true, |(_, best_area)| area > best_area) {
            best = Some((idx, area));
        }
    }
    best.map(|(idx, _)| idx)
}
