use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};

use blobface_core::blobbing::infrastructure::cpu_mask_blobber::CpuMaskBlobber;
use blobface_core::detection::domain::face_detector::FaceDetector;
use blobface_core::detection::infrastructure::model_resolver;
use blobface_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_CONFIDENCE,
};
use blobface_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use blobface_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use blobface_core::pipeline::blob_directory_use_case::BlobDirectoryUseCase;
use blobface_core::pipeline::blob_image_use_case::BlobImageUseCase;
use blobface_core::pipeline::output_dir::create_output_dir;
use blobface_core::shared::blob_config::{BlobColor, BlobConfig, BlobShape};
use blobface_core::shared::constants::YOLO_MODEL_NAME;

/// Cover every detected face in a directory of images with a colored blob.
///
/// Results are written to a new sibling directory named after the input
/// directory plus a random three-character suffix.
#[derive(Parser, Debug)]
#[command(name = "blob-your-face", version)]
struct Cli {
    /// Input directory containing images (.jpg, .jpeg, .png, .bmp).
    input_dir: PathBuf,

    /// Blob color as three comma-separated channel values in R,G,B order.
    #[arg(long, default_value = "255,255,255")]
    color: BlobColor,

    /// Shape of the blob.
    #[arg(long, value_enum, default_value = "circle")]
    shape: ShapeArg,

    /// Extra pixels added to the blob's radius / half extent.
    #[arg(long, default_value = "0")]
    pad: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    Circle,
    Ellipse,
    Rectangle,
    Square,
}

impl From<ShapeArg> for BlobShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Circle => BlobShape::Circle,
            ShapeArg::Ellipse => BlobShape::Ellipse,
            ShapeArg::Rectangle => BlobShape::Rectangle,
            ShapeArg::Square => BlobShape::Square,
        }
    }
}

impl Cli {
    fn blob_config(&self) -> BlobConfig {
        BlobConfig {
            color: self.color,
            shape: self.shape.into(),
            pad: self.pad,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let input_dir = validate_input_dir(&cli.input_dir)?;
    let config = cli.blob_config();
    log::info!(
        "Blob: shape={} color={} pad={}",
        config.shape,
        config.color,
        config.pad
    );

    let detector = build_detector()?;
    let output_dir = create_output_dir(&input_dir, &mut rand::thread_rng())?;
    log::info!("Writing results to {}", output_dir.display());

    let image_use_case = BlobImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        detector,
        Box::new(CpuMaskBlobber::new(config)),
    );
    let report = BlobDirectoryUseCase::new(image_use_case).execute(&input_dir, &output_dir)?;

    log::info!(
        "Done: {} image(s) written, {} skipped, {} face(s) covered",
        report.processed.len(),
        report.skipped.len(),
        report.faces
    );
    Ok(())
}

fn build_detector() -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let model_path = model_resolver::resolve(YOLO_MODEL_NAME)?;
    Ok(Box::new(OnnxYoloDetector::new(
        &model_path,
        DEFAULT_CONFIDENCE,
    )?))
}

/// Absolute path of the input directory, which must exist.
fn validate_input_dir(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("Input directory not found: {}", path.display()).into());
    }
    Ok(path.canonicalize()?)
}
