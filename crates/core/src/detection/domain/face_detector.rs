use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for locating faces in a still frame.
///
/// Returned regions are ordered by descending detection confidence.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
