use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageDecoder};
use thiserror::Error;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
#[error("unable to read image {path}: {source}")]
pub struct ImageReadError {
    pub path: PathBuf,
    #[source]
    pub source: image::ImageError,
}

/// Decodes image files with the `image` crate, converting every pixel
/// format (gray, RGBA, 16-bit) to 8-bit RGB.
///
/// The format is sniffed from the file contents, so a mislabelled
/// extension still decodes and a corrupt file fails cleanly. Pixels are
/// rotated upright according to the EXIF orientation tag.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = decode_upright(path)
            .map_err(|source| ImageReadError {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Frame::new(img.into_raw(), width, height))
    }
}

/// Decodes `path` and applies its EXIF orientation, if any.
fn decode_upright(path: &Path) -> image::ImageResult<DynamicImage> {
    let mut decoder = image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_read_returns_rgb_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.png", 100, 80);
        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.pixel(0, 0), [50, 100, 200]);
    }

    #[test]
    fn test_read_converts_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([9, 8, 7, 10]))
            .save(&path)
            .unwrap();
        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.pixel(3, 3), [9, 8, 7]);
    }

    #[test]
    fn test_read_bmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "test.bmp", 7, 5);
        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (7, 5));
    }

    /// JPEG bytes of a `width` × `height` image whose left half is red and
    /// right half blue, with an EXIF orientation tag when one is given.
    fn split_jpeg(width: u32, height: u32, orientation: Option<u16>) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let mut jpeg = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();
        let Some(orientation) = orientation else {
            return jpeg;
        };

        // APP1 "Exif" segment: big-endian TIFF header, one IFD entry for
        // tag 0x0112 (SHORT, count 1), no next IFD.
        let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x01];
        tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff);
        let mut segment = vec![0xFF, 0xE1];
        segment.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
        segment.extend_from_slice(&payload);

        // Right after SOI
        jpeg.splice(2..2, segment);
        jpeg
    }

    fn is_reddish([r, _, b]: [u8; 3]) -> bool {
        r > 180 && b < 80
    }

    fn is_bluish([r, _, b]: [u8; 3]) -> bool {
        b > 180 && r < 80
    }

    #[test]
    fn test_read_jpeg_without_orientation_keeps_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, split_jpeg(64, 32, None)).unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 32));
        assert!(is_reddish(frame.pixel(8, 16)));
        assert!(is_bluish(frame.pixel(56, 16)));
    }

    #[test]
    fn test_read_applies_exif_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone.jpg");
        // 6 = rotate 90 degrees clockwise to display
        std::fs::write(&path, split_jpeg(64, 32, Some(6))).unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!((frame.width(), frame.height()), (32, 64));
        // The left (red) half ends up on top
        assert!(is_reddish(frame.pixel(16, 8)), "{:?}", frame.pixel(16, 8));
        assert!(is_bluish(frame.pixel(16, 56)), "{:?}", frame.pixel(16, 56));
    }

    #[test]
    fn test_read_nonexistent_fails() {
        let result = ImageFileReader::new().read(Path::new("/nonexistent/test.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_corrupt_file_fails_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        let err = ImageFileReader::new().read(&path).unwrap_err();
        assert!(err.to_string().contains("broken.jpg"));
    }
}
