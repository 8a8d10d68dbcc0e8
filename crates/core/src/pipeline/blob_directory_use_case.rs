use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;

use super::blob_image_use_case::{BlobImageUseCase, ImageOutcome};

/// An input file that was passed over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a directory run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Output files written, in processing order.
    pub processed: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    /// Faces covered across all written images.
    pub faces: usize,
}

/// Batch driver: runs the single-image pipeline over every supported image
/// in a directory, writing results under the same file names elsewhere.
///
/// Files are handled one at a time in file-name order. Unreadable images are
/// logged and skipped; any other failure stops the batch.
pub struct BlobDirectoryUseCase {
    image_use_case: BlobImageUseCase,
}

impl BlobDirectoryUseCase {
    pub fn new(image_use_case: BlobImageUseCase) -> Self {
        Self { image_use_case }
    }

    pub fn execute(
        &mut self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<BatchReport, Box<dyn std::error::Error>> {
        let inputs = list_images(input_dir)?;
        log::info!(
            "Found {} image(s) in {}",
            inputs.len(),
            input_dir.display()
        );

        let mut report = BatchReport::default();
        for input_path in inputs {
            let Some(file_name) = input_path.file_name() else {
                continue;
            };
            let output_path = output_dir.join(file_name);

            match self.image_use_case.execute(&input_path, &output_path)? {
                ImageOutcome::Written { faces } => {
                    log::info!("Processed image saved to {}", output_path.display());
                    report.faces += faces;
                    report.processed.push(output_path);
                }
                ImageOutcome::Unreadable { reason } => {
                    log::warn!("Error: Unable to read image {}", input_path.display());
                    log::debug!("{reason}");
                    report.skipped.push(SkippedFile {
                        path: input_path,
                        reason,
                    });
                }
            }
        }
        Ok(report)
    }
}

/// Regular files in `dir` with a supported image extension, sorted by name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// True when the file name ends in `.<ext>` for an allow-listed extension,
/// ignoring case. A bare `.png` counts; non-UTF-8 names are matched lossily.
pub fn is_supported_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}
