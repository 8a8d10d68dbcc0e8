use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Boxes come back in the order the detector ranks them; callers apply
/// blobs in that order. `&mut self` leaves room for implementations that
/// keep scratch buffers between calls.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
