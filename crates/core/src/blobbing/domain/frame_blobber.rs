use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for covering one face with a blob.
///
/// Returns a new frame rather than editing in place; the caller decides
/// whether to replace its copy.
pub trait FrameBlobber: Send {
    fn blob(&self, frame: &Frame, face: &FaceBox) -> Result<Frame, Box<dyn std::error::Error>>;
}
