//! Linear pixel-to-wavelength approximation.
//!
//! The dispersion axis is mapped linearly onto the visible band. This is
//! an approximation, not an optical calibration against a reference light
//! source, and every consumer of a wavelength in this crate goes through
//! these two functions so a future real calibration has one seam to
//! replace.

use serde::{
    Deserialize,
    Serialize,
};

/// Wavelength mapped to bin 0.
pub const WAVELENGTH_MIN_NM: u32 = 380;

/// Wavelength mapped to the last bin.
pub const WAVELENGTH_MAX_NM: u32 = 750;

/// First wavelength classified as the green region.
pub const GREEN_REGION_START_NM: u32 = 490;

/// First wavelength classified as the red region.
pub const RED_REGION_START_NM: u32 = 580;

/// Maps a bin index onto `[380, 750]` nm, rounded to the nearest integer.
///
/// `bin` must be within `[0, num_bins - 1]` and `num_bins >= 2`.
///
/// # Example
///
/// ```
/// use bandpipe::wavelength::bin_to_wavelength;
///
/// assert_eq!(bin_to_wavelength(0, 100), 380);
/// assert_eq!(bin_to_wavelength(99, 100), 750);
/// ```
pub fn bin_to_wavelength(bin: usize, num_bins: usize) -> u32 {
    debug_assert!(num_bins >= 2, "wavelength mapping needs at least 2 bins");
    let span = (WAVELENGTH_MAX_NM - WAVELENGTH_MIN_NM) as f64;
    let frac = bin as f64 / (num_bins - 1) as f64;
    (WAVELENGTH_MIN_NM as f64 + frac * span).round() as u32
}

/// Inverse of [`bin_to_wavelength`]. Out-of-band wavelengths clamp to the
/// first/last bin.
pub fn wavelength_to_bin(wavelength_nm: u32, num_bins: usize) -> usize {
    debug_assert!(num_bins >= 2, "wavelength mapping needs at least 2 bins");
    let clamped = wavelength_nm.clamp(WAVELENGTH_MIN_NM, WAVELENGTH_MAX_NM);
    let span = (WAVELENGTH_MAX_NM - WAVELENGTH_MIN_NM) as f64;
    let frac = (clamped - WAVELENGTH_MIN_NM) as f64 / span;
    (frac * (num_bins - 1) as f64).round() as usize
}

/// The three sensor-response regions of the visible band.
///
/// Region membership selects the channel-mixing weights and the peak
/// threshold for a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralRegion {
    Blue,
    Green,
    Red,
}

impl SpectralRegion {
    pub fn from_wavelength(wavelength_nm: u32) -> Self {
        if wavelength_nm < GREEN_REGION_START_NM {
            SpectralRegion::Blue
        } else if wavelength_nm < RED_REGION_START_NM {
            SpectralRegion::Green
        } else {
            SpectralRegion::Red
        }
    }
}
