/// Single-channel coverage raster matching a frame's dimensions.
///
/// Values are in `[0, 255]`; any non-zero value counts as covered when
/// compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.get(x, y) > 0
    }

    /// Number of pixels with a non-zero value.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    /// Inclusive `(min_x, min_y, max_x, max_y)` of the covered pixels, or
    /// `None` for an empty mask.
    pub fn bounding_box(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_covered(x, y) {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }
}
