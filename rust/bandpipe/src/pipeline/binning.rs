//! Spatial projection of a pixel block onto wavelength bins.
//!
//! Every texel is assigned to a bin by its column (the dispersion axis runs
//! horizontally), after dark-frame subtraction and dark-texel rejection.
//! The output keeps per-channel sums and a per-bin texel count so that
//! empty bins can be told apart from genuinely dark ones.

use crate::NUM_BINS;
use crate::errors::{
    BandpipeError,
    Result,
};
use crate::models::PixelBlock;

/// Texels whose absolute channel sum (0-765) falls below this are treated
/// as sensor noise and contribute to no bin.
pub const DARK_TEXEL_THRESHOLD: u16 = 30;

/// Scale applied to the calibration frame's red channel before subtraction.
pub const NOISE_SCALE_RED: f64 = 0.95;

/// Scale applied to the calibration frame's green channel before
/// subtraction. Above 1.0 to compensate a known green oversensitivity bias
/// in consumer camera sensors; changing it changes every downstream value.
pub const NOISE_SCALE_GREEN: f64 = 1.05;

/// Scale applied to the calibration frame's blue channel before subtraction.
pub const NOISE_SCALE_BLUE: f64 = 0.95;

/// Per-channel intensity sums of one binning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedChannels {
    red: Vec<f64>,
    green: Vec<f64>,
    blue: Vec<f64>,
    counts: Vec<u32>,
}

impl BinnedChannels {
    fn with_bins(num_bins: usize) -> Self {
        Self {
            red: vec![0.0; num_bins],
            green: vec![0.0; num_bins],
            blue: vec![0.0; num_bins],
            counts: vec![0; num_bins],
        }
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Per-channel averages `(red, green, blue)` for one bin. A bin that
    /// no texel landed in averages to zero on all channels.
    pub fn averages_at(&self, bin: usize) -> (f64, f64, f64) {
        let count = self.counts[bin];
        if count == 0 {
            return (0.0, 0.0, 0.0);
        }
        let count = count as f64;
        (
            self.red[bin] / count,
            self.green[bin] / count,
            self.blue[bin] / count,
        )
    }

    /// Total number of texels that survived dark rejection.
    pub fn total_texels(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    #[cfg(test)]
    pub(crate) fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[cfg(test)]
    pub(crate) fn green_sums(&self) -> &[f64] {
        &self.green
    }
}

/// Reduces a pixel block into [`NUM_BINS`] per-channel summed intensities.
///
/// When a calibration frame is present its texel at the same `(x, y)` is
/// scaled by the per-channel noise factors and subtracted (floored at
/// zero). A calibration frame of different dimensions fails the whole call
/// rather than guessing an alignment.
pub fn bin_block(
    block: &PixelBlock,
    calibration: Option<&PixelBlock>,
) -> Result<BinnedChannels> {
    if let Some(cal) = calibration {
        if !cal.same_dimensions(block) {
            return Err(BandpipeError::CalibrationDimensionMismatch {
                expected: (block.width(), block.height()),
                got: (cal.width(), cal.height()),
            });
        }
    }

    let mut out = BinnedChannels::with_bins(NUM_BINS);
    let width = block.width();

    for y in 0..block.height() {
        for x in 0..width {
            let (r, g, b, _a) = block.rgba(x, y);
            if (r as u16 + g as u16 + b as u16) < DARK_TEXEL_THRESHOLD {
                continue;
            }

            let (noise_r, noise_g, noise_b) = match calibration {
                Some(cal) => {
                    let (nr, ng, nb, _na) = cal.rgba(x, y);
                    (nr as f64, ng as f64, nb as f64)
                }
                None => (0.0, 0.0, 0.0),
            };

            let adj_r = (r as f64 - noise_r * NOISE_SCALE_RED).max(0.0);
            let adj_g = (g as f64 - noise_g * NOISE_SCALE_GREEN).max(0.0);
            let adj_b = (b as f64 - noise_b * NOISE_SCALE_BLUE).max(0.0);

            let bin = ((x as f64 / width as f64) * NUM_BINS as f64) as usize;
            let bin = bin.min(NUM_BINS - 1);

            out.red[bin] += adj_r;
            out.green[bin] += adj_g;
            out.blue[bin] += adj_b;
            out.counts[bin] += 1;
        }
    }

    Ok(out)
}
