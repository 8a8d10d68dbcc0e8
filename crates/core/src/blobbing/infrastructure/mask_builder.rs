use std::cell::RefCell;
use std::ops::RangeInclusive;

use crate::blobbing::domain::mask::Mask;
use crate::shared::blob_config::BlobShape;
use crate::shared::constants::MASK_BLUR_KERNEL_SIZE;

use super::gaussian;

/// Value written for covered pixels before softening.
const MASK_ON: u8 = u8::MAX;

/// Builds soft-edged blob masks: a filled shape rasterised at full
/// intensity, then Gaussian-blurred with a fixed square kernel.
pub struct MaskBuilder {
    kernel: Vec<f32>,
    blur_temp: RefCell<Vec<f32>>,
}

impl MaskBuilder {
    pub fn new(kernel_size: usize) -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(kernel_size),
            blur_temp: RefCell::new(Vec::new()),
        }
    }

    /// Mask of `width` × `height` with `shape` centered at `center`.
    ///
    /// `size` is the radius for circles, the semi-axes for ellipses and the
    /// full side lengths for rectangles and squares.
    ///
    /// Only the shape's bounding box widened by twice the kernel radius is
    /// blurred. Everything further out stays zero under a full-raster blur
    /// too, so the result is identical.
    pub fn build(
        &self,
        width: u32,
        height: u32,
        center: (i32, i32),
        size: (i32, i32),
        shape: BlobShape,
    ) -> Mask {
        let mut mask = Mask::empty(width, height);
        let Some((xs, ys)) = shape_bounds(center, size, shape) else {
            return mask;
        };
        fill_shape(&mut mask, center, size, shape);

        let reach = 2 * (self.kernel.len() / 2) as i64;
        let window = clip(
            &mask,
            *xs.start() - reach..=*xs.end() + reach,
            *ys.start() - reach..=*ys.end() + reach,
        );
        if let Some((wx, wy)) = window {
            self.blur_window(&mut mask, wx, wy);
        }
        mask
    }

    fn blur_window(
        &self,
        mask: &mut Mask,
        xs: RangeInclusive<usize>,
        ys: RangeInclusive<usize>,
    ) {
        let stride = mask.width() as usize;
        let (x0, win_w) = (*xs.start(), xs.end() - xs.start() + 1);
        let (y0, win_h) = (*ys.start(), ys.end() - ys.start() + 1);

        let mut window = Vec::with_capacity(win_w * win_h);
        for y in ys {
            window.extend_from_slice(&mask.data()[y * stride + x0..y * stride + x0 + win_w]);
        }
        let mut temp = self.blur_temp.borrow_mut();
        gaussian::blur_plane_with_kernel(&mut window, win_w, win_h, &self.kernel, &mut temp);

        let data = mask.data_mut();
        for (row, src) in window.chunks_exact(win_w).enumerate() {
            let start = (y0 + row) * stride + x0;
            data[start..start + win_w].copy_from_slice(src);
        }
    }
}

impl Default for MaskBuilder {
    fn default() -> Self {
        Self::new(MASK_BLUR_KERNEL_SIZE)
    }
}

/// Hard-edged (0 / 255) rasterisation of a filled shape, clipped to the
/// raster bounds.
pub fn rasterize(
    width: u32,
    height: u32,
    center: (i32, i32),
    size: (i32, i32),
    shape: BlobShape,
) -> Mask {
    let mut mask = Mask::empty(width, height);
    fill_shape(&mut mask, center, size, shape);
    mask
}

fn fill_shape(mask: &mut Mask, center: (i32, i32), size: (i32, i32), shape: BlobShape) {
    let Some((xs, ys)) = shape_bounds(center, size, shape) else {
        return;
    };
    let Some((xs, ys)) = clip(mask, xs, ys) else {
        return;
    };
    match shape {
        BlobShape::Circle => fill_ellipse(mask, center, (size.0, size.0), xs, ys),
        BlobShape::Ellipse => fill_ellipse(mask, center, size, xs, ys),
        BlobShape::Rectangle | BlobShape::Square => fill_rect(mask, xs, ys),
    }
}

/// Unclipped inclusive pixel extent of a shape; `None` for a negative size.
fn shape_bounds(
    center: (i32, i32),
    size: (i32, i32),
    shape: BlobShape,
) -> Option<(RangeInclusive<i64>, RangeInclusive<i64>)> {
    if size.0 < 0 || size.1 < 0 {
        return None;
    }
    let (half_x, half_y) = match shape {
        BlobShape::Circle => (size.0, size.0),
        BlobShape::Ellipse => size,
        BlobShape::Rectangle | BlobShape::Square => (size.0 / 2, size.1 / 2),
    };
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let (hx, hy) = (i64::from(half_x), i64::from(half_y));
    Some((cx - hx..=cx + hx, cy - hy..=cy + hy))
}

/// Filled axis-aligned ellipse over the clipped bounds; a zero semi-axis
/// degenerates to a line.
fn fill_ellipse(
    mask: &mut Mask,
    center: (i32, i32),
    semi_axes: (i32, i32),
    xs: RangeInclusive<usize>,
    ys: RangeInclusive<usize>,
) {
    // i128 keeps `a² · b²` exact for any i32 semi-axes
    let a_sq = i128::from(semi_axes.0).pow(2);
    let b_sq = i128::from(semi_axes.1).pow(2);
    let limit = a_sq * b_sq;
    let width = mask.width() as usize;
    let data = mask.data_mut();
    for y in ys {
        let dy_sq = (y as i128 - i128::from(center.1)).pow(2);
        for x in xs.clone() {
            let dx_sq = (x as i128 - i128::from(center.0)).pow(2);
            if dx_sq * b_sq + dy_sq * a_sq <= limit {
                data[y * width + x] = MASK_ON;
            }
        }
    }
}

fn fill_rect(mask: &mut Mask, xs: RangeInclusive<usize>, ys: RangeInclusive<usize>) {
    let width = mask.width() as usize;
    let data = mask.data_mut();
    for y in ys {
        data[y * width + *xs.start()..=y * width + *xs.end()].fill(MASK_ON);
    }
}

/// Intersect pixel ranges with the raster; `None` when nothing is left.
fn clip(
    mask: &Mask,
    xs: RangeInclusive<i64>,
    ys: RangeInclusive<i64>,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    let clip_axis = |r: RangeInclusive<i64>, len: u32| {
        let lo = (*r.start()).max(0);
        let hi = (*r.end()).min(i64::from(len) - 1);
        (lo <= hi).then(|| lo as usize..=hi as usize)
    };
    Some((clip_axis(xs, mask.width())?, clip_axis(ys, mask.height())?))
}
