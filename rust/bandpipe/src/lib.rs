//! Spectral signal-processing pipeline for a diffraction-grating spectrometer.
//!
//! The input is a rectangular block of camera pixels containing a diffracted
//! light band; the output is a calibrated per-wavelength intensity or
//! absorbance profile. Every processing call is a pure function over its
//! inputs: fresh output arrays, no shared state, no I/O. Acquisition,
//! rendering and export live in the collaborating crates.

// Re-export main structures
pub use crate::models::peak::Peak;
pub use crate::models::pixel_block::PixelBlock;
pub use crate::pipeline::absorbance::compute_absorbance;
pub use crate::pipeline::binning::BinnedChannels;
pub use crate::pipeline::peaks::{
    PeakConfig,
    detect_peaks,
};
pub use crate::pipeline::process_frame;
pub use crate::wavelength::{
    SpectralRegion,
    bin_to_wavelength,
    wavelength_to_bin,
};

// Declare modules
pub mod display;
pub mod errors;
pub mod kernel;
pub mod models;
pub mod pipeline;
pub mod wavelength;

// Re-export errors
pub use crate::errors::{
    BandpipeError,
    Result,
};

/// Number of wavelength bins in every spectrum profile.
pub const NUM_BINS: usize = 100;
