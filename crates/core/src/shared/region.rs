/// Axis-aligned face bounding box in frame pixel coordinates.
///
/// The recognition core treats regions as opaque; only detection and
/// cropping look inside them.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

impl Region {
    /// Builds a region from `[x1, y1, x2, y2]` corner coordinates.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
        let x = x1.round() as i32;
        let y = y1.round() as i32;
        Self {
            x,
            y,
            width: (x2.round() as i32 - x).max(0),
            height: (y2.round() as i32 - y).max(0),
            confidence,
        }
    }

    /// Expands the box by `fraction` of its size on every side.
    ///
    /// Recognition models expect a margin around the tight detector box.
    pub fn padded(&self, fraction: f64) -> Self {
        let pad_x = (self.width as f64 * fraction).round() as i32;
        let pad_y = (self.height as f64 * fraction).round() as i32;
        Self {
            x: self.x - pad_x,
            y: self.y - pad_y,
            width: self.width + 2 * pad_x,
            height: self.height + 2 * pad_y,
            confidence: self.confidence,
        }
    }

    /// Intersection with a `frame_w` x `frame_h` frame, or `None` if empty.
    pub fn clamp_to(&self, frame_w: u32, frame_h: u32) -> Option<Region> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x + self.width).min(frame_w as i32);
        let y2 = (self.y + self.height).min(frame_h as i32);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            confidence: self.confidence,
        })
    }
}
