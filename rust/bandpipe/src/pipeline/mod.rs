//! The frame-to-profile processing chain.
//!
//! Spatial binning, channel combination and smoothing run once per
//! captured frame inside the caller's render loop; each call is pure and
//! returns a fresh profile. The cost is bounded by the block size, not the
//! bin count, and fits well inside one frame period at ~30 Hz.

pub mod absorbance;
pub mod binning;
pub mod combine;
pub mod peaks;
pub mod smooth;

pub use absorbance::compute_absorbance;
pub use binning::{
    BinnedChannels,
    bin_block,
};
pub use combine::combine_channels;
pub use peaks::{
    PeakConfig,
    detect_peaks,
};
pub use smooth::smooth;

use crate::errors::Result;
use crate::kernel::pipeline_kernel;
use crate::models::PixelBlock;
use tracing::debug;

/// Turns one captured block into a smoothed intensity profile of
/// [`NUM_BINS`](crate::NUM_BINS) bins.
///
/// Binning (with optional dark-frame subtraction), region-weighted channel
/// combination, then the size-5 sigma-1.0 Gaussian smoothing pass. The
/// only failure is a calibration frame whose dimensions do not match the
/// block.
pub fn process_frame(
    block: &PixelBlock,
    calibration: Option<&PixelBlock>,
) -> Result<Vec<f64>> {
    let binned = bin_block(block, calibration)?;
    debug!(
        "Binned {} texels from a {}x{} block",
        binned.total_texels(),
        block.width(),
        block.height()
    );
    let combined = combine_channels(&binned);
    Ok(smooth(&combined, &pipeline_kernel()))
}
