use crate::blobbing::domain::frame_blobber::FrameBlobber;
use crate::blobbing::domain::mask::Mask;
use crate::shared::blob_config::{BlobConfig, BlobShape};
use crate::shared::face_box::FaceBox;
use crate::shared::frame::{Frame, FRAME_CHANNELS};

use super::mask_builder::MaskBuilder;

/// CPU blobber: builds a soft mask around the face and paints the fill
/// color over every pixel the mask touches.
///
/// The mask's gray levels are not used as weights; any non-zero value is a
/// full overwrite, so the blur only grows the blob slightly.
pub struct CpuMaskBlobber {
    config: BlobConfig,
    mask_builder: MaskBuilder,
}

impl CpuMaskBlobber {
    pub fn new(config: BlobConfig) -> Self {
        Self {
            config,
            mask_builder: MaskBuilder::default(),
        }
    }

    /// Mask this blobber would paint for `face` on a `width` × `height` frame.
    pub fn mask_for(&self, width: u32, height: u32, face: &FaceBox) -> Mask {
        let (center, size) =
            blob_geometry(face, self.config.shape, self.config.pad, (width, height));
        self.mask_builder
            .build(width, height, center, size, self.config.shape)
    }
}

impl FrameBlobber for CpuMaskBlobber {
    fn blob(&self, frame: &Frame, face: &FaceBox) -> Result<Frame, Box<dyn std::error::Error>> {
        let mask = self.mask_for(frame.width(), frame.height(), face);
        Ok(composite(frame, &mask, self.config.color.0))
    }
}

/// Center and size handed to the mask builder for a face on a raster of
/// `bounds` (width, height).
///
/// Both axes get `longer_side / 2 + pad`; a square always takes the first
/// axis for both so it cannot stretch with the face box. The extent is
/// capped once it already covers the whole raster, so any `pad` fits in
/// `i32`.
pub fn blob_geometry(
    face: &FaceBox,
    shape: BlobShape,
    pad: u32,
    bounds: (u32, u32),
) -> ((i32, i32), (i32, i32)) {
    let center = face.center();
    let wanted = i64::from(face.longer_side().div_euclid(2)) + i64::from(pad);
    let extent = wanted.min(covering_extent(center, bounds));
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    let mut size = (extent, extent);
    if shape == BlobShape::Square {
        size.1 = size.0;
    }
    (center, size)
}

/// An extent at which every shape centered at `center` covers the whole
/// raster. Rectangles only reach half their extent on each side, hence
/// the doubling.
fn covering_extent(center: (i32, i32), (width, height): (u32, u32)) -> i64 {
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let far_x = cx.abs().max((i64::from(width) - 1 - cx).abs());
    let far_y = cy.abs().max((i64::from(height) - 1 - cy).abs());
    2 * (far_x + far_y) + 2
}

/// Copy of `frame` with `color` written wherever `mask` is non-zero.
pub fn composite(frame: &Frame, mask: &Mask, color: [u8; 3]) -> Frame {
    debug_assert_eq!((frame.width(), frame.height()), (mask.width(), mask.height()));
    let channels = FRAME_CHANNELS as usize;
    let mut out = frame.clone();
    for (pixel, &m) in out.data_mut().chunks_exact_mut(channels).zip(mask.data()) {
        if m > 0 {
            pixel.copy_from_slice(&color);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::blob_config::BlobColor;
    use rstest::rstest;

    const BLUE: [u8; 3] = [0, 0, 255];

    fn blobber(shape: BlobShape, pad: u32) -> CpuMaskBlobber {
        CpuMaskBlobber::new(BlobConfig {
            color: BlobColor(BLUE),
            shape,
            pad,
        })
    }

    fn changed_pixels(before: &Frame, after: &Frame) -> Vec<(u32, u32)> {
        let mut changed = Vec::new();
        for y in 0..before.height() {
            for x in 0..before.width() {
                if before.pixel(x, y) != after.pixel(x, y) {
                    changed.push((x, y));
                }
            }
        }
        changed
    }

    #[test]
    fn test_geometry_uses_longer_side_plus_pad() {
        let face = FaceBox::new(10, 20, 30, 50);
        let (center, size) = blob_geometry(&face, BlobShape::Ellipse, 4, (200, 200));
        assert_eq!(center, (25, 45));
        assert_eq!(size, (29, 29));
    }

    #[test]
    fn test_geometry_caps_extent_for_huge_pad() {
        let face = FaceBox::new(20, 20, 30, 30);
        let (_, capped) = blob_geometry(&face, BlobShape::Circle, u32::MAX, (100, 100));
        let (_, larger) = blob_geometry(&face, BlobShape::Circle, 1_000, (100, 100));
        assert!(capped.0 > 0);
        assert_eq!(capped, larger);
    }

    #[test]
    fn test_square_geometry_ignores_aspect_ratio() {
        let face = FaceBox::new(0, 0, 80, 20);
        let (_, size) = blob_geometry(&face, BlobShape::Square, 0, (200, 200));
        assert_eq!(size.0, size.1);
    }

    #[test]
    fn test_composite_is_hard_overwrite() {
        let frame = Frame::filled(4, 1, [10, 10, 10]);
        let mut mask = Mask::empty(4, 1);
        mask.data_mut().copy_from_slice(&[0, 1, 128, 255]);
        let out = composite(&frame, &mask, BLUE);
        assert_eq!(out.pixel(0, 0), [10, 10, 10]);
        assert_eq!(out.pixel(1, 0), BLUE);
        assert_eq!(out.pixel(2, 0), BLUE);
        assert_eq!(out.pixel(3, 0), BLUE);
    }

    #[rstest]
    #[case(BlobShape::Circle)]
    #[case(BlobShape::Ellipse)]
    #[case(BlobShape::Rectangle)]
    #[case(BlobShape::Square)]
    fn test_unmasked_pixels_keep_original_values(#[case] shape: BlobShape) {
        // Gradient so a stray write would be visible
        let data = (0..80 * 60 * 3).map(|i| (i % 251) as u8).collect();
        let frame = Frame::new(data, 80, 60);
        let b = blobber(shape, 2);
        let face = FaceBox::new(30, 20, 16, 12);

        let out = b.blob(&frame, &face).unwrap();
        let mask = b.mask_for(80, 60, &face);
        for y in 0..60 {
            for x in 0..80 {
                if mask.get(x, y) == 0 {
                    assert_eq!(out.pixel(x, y), frame.pixel(x, y), "({x}, {y})");
                } else {
                    assert_eq!(out.pixel(x, y), BLUE, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_blob_does_not_mutate_input() {
        let frame = Frame::filled(50, 50, [1, 2, 3]);
        let snapshot = frame.clone();
        let _ = blobber(BlobShape::Circle, 0)
            .blob(&frame, &FaceBox::new(10, 10, 20, 20))
            .unwrap();
        assert_eq!(frame, snapshot);
    }

    #[rstest]
    #[case(BlobShape::Circle)]
    #[case(BlobShape::Ellipse)]
    #[case(BlobShape::Rectangle)]
    #[case(BlobShape::Square)]
    fn test_coverage_grows_with_pad(#[case] shape: BlobShape) {
        let face = FaceBox::new(90, 90, 20, 20);
        let coverages: Vec<usize> = (0..=8)
            .map(|pad| blobber(shape, pad).mask_for(200, 200, &face).coverage())
            .collect();
        for pair in coverages.windows(2) {
            assert!(pair[1] >= pair[0], "{shape}: {coverages:?}");
        }
        assert!(coverages[8] > coverages[0], "{shape}: {coverages:?}");
    }

    #[rstest]
    fn test_huge_pad_covers_whole_frame(
        #[values(BlobShape::Circle, BlobShape::Ellipse, BlobShape::Rectangle, BlobShape::Square)]
        shape: BlobShape,
        #[values(60_000, 100_000, 3_000_000_000, u32::MAX)] pad: u32,
    ) {
        let frame = Frame::filled(100, 100, [200, 200, 200]);
        let b = blobber(shape, pad);
        let face = FaceBox::new(20, 20, 30, 30);

        assert_eq!(b.mask_for(100, 100, &face).coverage(), 100 * 100);
        let out = b.blob(&frame, &face).unwrap();
        assert_eq!(out, Frame::filled(100, 100, BLUE));
    }

    #[rstest]
    #[case(BlobShape::Circle)]
    #[case(BlobShape::Ellipse)]
    #[case(BlobShape::Rectangle)]
    #[case(BlobShape::Square)]
    fn test_huge_pad_on_box_far_outside_frame(#[case] shape: BlobShape) {
        let face = FaceBox::new(-5_000, 9_000, 10, 10);
        let mask = blobber(shape, 100_000).mask_for(100, 100, &face);
        assert_eq!(mask.coverage(), 100 * 100, "{shape}");
    }

    #[test]
    fn test_square_mask_extent_is_square_for_wide_face() {
        let face = FaceBox::new(60, 80, 60, 20);
        let mask = blobber(BlobShape::Square, 3).mask_for(200, 200, &face);
        let (x0, y0, x1, y1) = mask.bounding_box().unwrap();
        assert_eq!(x1 - x0, y1 - y0);
    }

    #[test]
    fn test_circle_on_solid_image_stays_near_face() {
        let frame = Frame::filled(100, 100, [200, 200, 200]);
        let face = FaceBox::new(20, 20, 30, 30);
        let out = blobber(BlobShape::Circle, 0).blob(&frame, &face).unwrap();

        // Inside the radius-15 disc around (35, 35) everything is painted
        for (x, y) in [(35, 35), (20, 35), (50, 35), (35, 20), (35, 50), (45, 45)] {
            assert_eq!(out.pixel(x, y), BLUE, "({x}, {y})");
        }
        // Changes are limited to the disc widened by the blur kernel's reach
        for (x, y) in changed_pixels(&frame, &out) {
            let (dx, dy) = (x as f64 - 35.0, y as f64 - 35.0);
            assert!((dx * dx + dy * dy).sqrt() <= 15.0 + 25.0 * 2f64.sqrt());
        }
        assert_eq!(out.pixel(99, 99), [200, 200, 200]);
        assert_eq!(out.pixel(90, 35), [200, 200, 200]);
    }

    #[test]
    fn test_later_faces_overwrite_earlier_blobs() {
        let frame = Frame::filled(60, 60, [0, 0, 0]);
        let red = CpuMaskBlobber::new(BlobConfig {
            color: BlobColor([255, 0, 0]),
            shape: BlobShape::Circle,
            pad: 0,
        });
        let face = FaceBox::new(20, 20, 20, 20);
        let once = red.blob(&frame, &face).unwrap();
        let twice = blobber(BlobShape::Circle, 0).blob(&once, &face).unwrap();
        assert_eq!(twice.pixel(30, 30), BLUE);
    }
}
