use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Outline of the blob painted over a face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlobShape {
    #[default]
    Circle,
    Ellipse,
    Rectangle,
    Square,
}

impl BlobShape {
    pub const ALL: [BlobShape; 4] = [
        BlobShape::Circle,
        BlobShape::Ellipse,
        BlobShape::Rectangle,
        BlobShape::Square,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlobShape::Circle => "circle",
            BlobShape::Ellipse => "ellipse",
            BlobShape::Rectangle => "rectangle",
            BlobShape::Square => "square",
        }
    }
}

impl fmt::Display for BlobShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BlobColorError {
    #[error("expected 3 comma-separated components, got {0}")]
    ComponentCount(usize),
    #[error("color component '{0}' is not an integer in 0..=255")]
    Component(String),
}

/// Fill color in the frame's native channel order (RGB).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobColor(pub [u8; 3]);

impl Default for BlobColor {
    fn default() -> Self {
        Self([255, 255, 255])
    }
}

impl FromStr for BlobColor {
    type Err = BlobColorError;

    /// Parses `"c0,c1,c2"`; surrounding whitespace around each component is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(BlobColorError::ComponentCount(parts.len()));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u8>()
                .map_err(|_| BlobColorError::Component(part.to_string()))?;
        }
        Ok(Self(rgb))
    }
}

impl fmt::Display for BlobColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a},{b},{c}")
    }
}

/// Appearance of every blob in a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlobConfig {
    pub color: BlobColor,
    pub shape: BlobShape,
    /// Extra pixels added to the blob's radius / half extent.
    pub pad: u32,
}
