use crate::errors::{
    BandpipeError,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};

/// A rectangular block of captured camera pixels.
///
/// The buffer is flat RGBA, row-major, one byte per channel, so its length
/// is always `4 * width * height` (checked at construction). Blocks are
/// immutable once built; the frame, reference, sample and calibration
/// captures are four independently owned instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBlock {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Bytes per texel in the flat buffer.
const CHANNELS: usize = 4;

impl PixelBlock {
    /// Builds a block from a flat RGBA buffer.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * CHANNELS {
            return Err(BandpipeError::BlockShape {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a block where every texel has the same RGB value, opaque
    /// alpha. Mostly useful for tests and synthetic calibration.
    pub fn uniform(width: usize, height: usize, rgb: (u8, u8, u8)) -> Self {
        let data = [rgb.0, rgb.1, rgb.2, 255].repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The ordered channel samples of the texel at `(x, y)`.
    ///
    /// Callers guarantee `x < width` and `y < height`; the pipeline only
    /// ever walks its own block's dimensions.
    pub fn rgba(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let offset = (y * self.width + x) * CHANNELS;
        (
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    pub fn same_dimensions(&self, other: &PixelBlock) -> bool {
        self.width == other.width && self.height == other.height
    }
}
