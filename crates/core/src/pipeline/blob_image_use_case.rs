use std::path::Path;

use crate::blobbing::domain::frame_blobber::FrameBlobber;
use crate::detection::domain::face_detector::FaceDetector;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;

/// What happened to a single input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    /// Output written with this many faces covered.
    Written { faces: usize },
    /// The input could not be decoded; nothing was written.
    Unreadable { reason: String },
}

/// Single-image pipeline: read → detect → blob each face → write.
pub struct BlobImageUseCase {
    reader: Box<dyn ImageReader>,
    image_writer: Box<dyn ImageWriter>,
    detector: Box<dyn FaceDetector>,
    blobber: Box<dyn FrameBlobber>,
}

impl BlobImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        image_writer: Box<dyn ImageWriter>,
        detector: Box<dyn FaceDetector>,
        blobber: Box<dyn FrameBlobber>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            detector,
            blobber,
        }
    }

    /// Processes one image.
    ///
    /// A decode failure is reported as [`ImageOutcome::Unreadable`]; detection,
    /// compositing and write failures are returned as errors.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<ImageOutcome, Box<dyn std::error::Error>> {
        let mut frame = match self.reader.read(input_path) {
            Ok(frame) => frame,
            Err(e) => {
                return Ok(ImageOutcome::Unreadable {
                    reason: e.to_string(),
                })
            }
        };

        let faces = self.detector.detect(&frame)?;
        for face in &faces {
            log::debug!(
                "{}: face at ({}, {}) {}x{} conf={:.2}",
                input_path.display(),
                face.x,
                face.y,
                face.width,
                face.height,
                face.confidence
            );
            frame = self.blobber.blob(&frame, face)?;
        }

        self.image_writer.write(output_path, &frame)?;
        Ok(ImageOutcome::Written { faces: faces.len() })
    }
}
