use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes an image file into an RGB frame.
///
/// Any error means the file could not be used as an image; callers treat
/// it as a per-file failure rather than a fatal one.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
