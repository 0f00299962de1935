/// A face bounding box in source-image pixels, `(top, right, bottom, left)`.
///
/// Producers are expected to emit `right >= left` and `bottom >= top`, but
/// nothing enforces it; every size computation floors at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl BoundingBox {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Builds a box from corner coordinates `(x1, y1, x2, y2)`, rounding
    /// to the nearest pixel.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            top: y1.round() as i32,
            right: x2.round() as i32,
            bottom: y2.round() as i32,
            left: x1.round() as i32,
        }
    }

    pub fn width(&self) -> i64 {
        (self.right as i64 - self.left as i64).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.bottom as i64 - self.top as i64).max(0)
    }

    /// Pixel area; zero for degenerate or inverted boxes.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Returns a copy clamped to a `width` × `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        Self {
            top: self.top.clamp(0, h),
            right: self.right.clamp(0, w),
            bottom: self.bottom.clamp(0, h),
            left: self.left.clamp(0, w),
        }
    }
}
