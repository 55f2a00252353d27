//! Merges the three per-channel bin averages into one intensity per bin.
//!
//! The weights approximate the inverse of the camera's sensor response per
//! wavelength region. They are empirically tuned, not physically derived;
//! changing any of them changes every downstream absorbance value.

use crate::pipeline::binning::BinnedChannels;
use crate::wavelength::{
    SpectralRegion,
    bin_to_wavelength,
};

/// Channel mix applied to the per-bin averages of one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub blue: f64,
    pub green: f64,
    pub red: f64,
}

/// Mix for bins below 490 nm.
pub const BLUE_REGION_WEIGHTS: ChannelWeights = ChannelWeights {
    blue: 1.0,
    green: 0.2,
    red: 0.0,
};

/// Mix for bins in 490-580 nm.
pub const GREEN_REGION_WEIGHTS: ChannelWeights = ChannelWeights {
    blue: 0.2,
    green: 0.7,
    red: 0.2,
};

/// Mix for bins at or above 580 nm.
pub const RED_REGION_WEIGHTS: ChannelWeights = ChannelWeights {
    blue: 0.0,
    green: 0.2,
    red: 0.8,
};

pub fn weights_for(region: SpectralRegion) -> ChannelWeights {
    match region {
        SpectralRegion::Blue => BLUE_REGION_WEIGHTS,
        SpectralRegion::Green => GREEN_REGION_WEIGHTS,
        SpectralRegion::Red => RED_REGION_WEIGHTS,
    }
}

/// Produces one intensity per bin as the region-weighted sum of the three
/// channel averages. Non-finite averages count as zero, so the output is
/// always finite and non-negative.
pub fn combine_channels(binned: &BinnedChannels) -> Vec<f64> {
    let num_bins = binned.num_bins();
    (0..num_bins)
        .map(|bin| {
            let (r, g, b) = binned.averages_at(bin);
            let r = sanitize(r);
            let g = sanitize(g);
            let b = sanitize(b);
            let weights = weights_for(SpectralRegion::from_wavelength(bin_to_wavelength(
                bin, num_bins,
            )));
            weights.blue * b + weights.green * g + weights.red * r
        })
        .collect()
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
