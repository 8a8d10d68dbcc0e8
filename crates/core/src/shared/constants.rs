/// YOLOv8 face model exported to ONNX, looked up by file name.
pub const YOLO_MODEL_NAME: &str = "yolov8n-face.onnx";

/// Application folder name under the platform cache directory.
pub const APP_DIR_NAME: &str = "blobface";

/// Extensions (lowercase, without dot) the batch driver picks up.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Side length of the square Gaussian kernel that softens blob masks.
pub const MASK_BLUR_KERNEL_SIZE: usize = 51;

/// Length of the random suffix appended to the output directory name.
pub const OUTPUT_SUFFIX_LEN: usize = 3;

/// Alphabet the output directory suffix is drawn from.
pub const OUTPUT_SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
