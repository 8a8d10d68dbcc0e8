/// Axis-aligned face bounding box in pixel coordinates.
///
/// Coordinates are expected to lie within the image but this is not
/// enforced; downstream rasterisation clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence: 1.0,
        }
    }

    /// Builds a box from corner coordinates, truncating each corner to an
    /// integer pixel first.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            confidence,
        }
    }

    /// Integer center point (floor of the half extents).
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + self.width.div_euclid(2),
            self.y + self.height.div_euclid(2),
        )
    }

    pub fn longer_side(&self) -> i32 {
        self.width.max(self.height)
    }
}
