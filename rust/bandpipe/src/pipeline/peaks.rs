//! Peak detection over a smoothed spectrum profile.

use crate::models::Peak;
use crate::wavelength::{
    SpectralRegion,
    bin_to_wavelength,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Window of the extra centered moving average applied before candidate
/// selection.
pub const PEAK_AVERAGE_WINDOW: usize = 5;

/// Minimum horizontal distance, in rendered canvas pixels, between two
/// accepted peaks.
pub const MIN_PEAK_SEPARATION_PX: f64 = 25.0;

/// Canvas width the separation rule was tuned against.
pub const DEFAULT_RENDER_WIDTH_PX: f64 = 640.0;

/// Candidate threshold for bins below 490 nm.
pub const BLUE_PEAK_THRESHOLD: f64 = 0.05;

/// Candidate threshold for bins in 490-580 nm.
pub const GREEN_PEAK_THRESHOLD: f64 = 0.05;

/// Candidate threshold for bins at or above 580 nm.
pub const RED_PEAK_THRESHOLD: f64 = 0.05;

/// Tunables of one detection pass.
///
/// The three thresholds are currently equal but tuned independently, so
/// they stay separate fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Width of the canvas the profile is rendered onto; the separation
    /// window is expressed in this coordinate space, not in bins.
    pub render_width_px: f64,
    pub min_separation_px: f64,
    pub blue_threshold: f64,
    pub green_threshold: f64,
    pub red_threshold: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            render_width_px: DEFAULT_RENDER_WIDTH_PX,
            min_separation_px: MIN_PEAK_SEPARATION_PX,
            blue_threshold: BLUE_PEAK_THRESHOLD,
            green_threshold: GREEN_PEAK_THRESHOLD,
            red_threshold: RED_PEAK_THRESHOLD,
        }
    }
}

impl PeakConfig {
    fn threshold_for(&self, region: SpectralRegion) -> f64 {
        match region {
            SpectralRegion::Blue => self.blue_threshold,
            SpectralRegion::Green => self.green_threshold,
            SpectralRegion::Red => self.red_threshold,
        }
    }
}

/// Finds locally dominant, well-separated maxima in a smoothed profile.
///
/// The profile is first run through a centered 5-tap moving average. A bin
/// is a candidate iff its averaged value strictly exceeds both immediate
/// and both second neighbors and the threshold of its wavelength region.
/// Candidates are accepted in index order; one that falls within the
/// separation window of an already-accepted peak is dropped, so an earlier
/// smaller peak can block a later larger one. That first-come tie-break is
/// reproducibility-sensitive and must not be changed to highest-wins.
pub fn detect_peaks(profile: &[f64], config: &PeakConfig) -> Vec<Peak> {
    let num_bins = profile.len();
    if num_bins < PEAK_AVERAGE_WINDOW {
        return Vec::new();
    }

    let averaged = centered_moving_average(profile, PEAK_AVERAGE_WINDOW);
    let px_per_bin = config.render_width_px / num_bins as f64;
    let mut peaks: Vec<Peak> = Vec::new();

    for bin in 2..num_bins - 2 {
        let value = averaged[bin];
        let dominant = value > averaged[bin - 1]
            && value > averaged[bin + 1]
            && value > averaged[bin - 2]
            && value > averaged[bin + 2];
        if !dominant {
            continue;
        }

        let wavelength_nm = bin_to_wavelength(bin, num_bins);
        let region = SpectralRegion::from_wavelength(wavelength_nm);
        if value <= config.threshold_for(region) {
            continue;
        }

        let position_px = bin as f64 * px_per_bin;
        let blocked = peaks
            .iter()
            .any(|p| (position_px - p.bin as f64 * px_per_bin).abs() <= config.min_separation_px);
        if blocked {
            continue;
        }

        peaks.push(Peak {
            wavelength_nm,
            value: profile[bin],
            bin,
        });
    }

    peaks
}

/// Centered moving average with a truncated window at the edges, matching
/// the smoother's renormalization policy. Non-finite values count as zero.
fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            let mut sum = 0.0;
            for &v in &values[lo..hi] {
                if v.is_finite() {
                    sum += v;
                }
            }
            sum / (hi - lo) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NUM_BINS;

    fn gaussian_bump(center: usize, height: f64, sigma: f64) -> Vec<f64> {
        (0..NUM_BINS)
            .map(|i| {
                let d = i as f64 - center as f64;
                height * (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect()
    }

    #[test]
    fn test_single_bump_reports_single_peak() {
        let profile = gaussian_bump(50, 0.8, 3.0);
        let peaks = detect_peaks(&profile, &PeakConfig::default());
        assert_eq!(peaks.len(), 1);
        let peak = &peaks[0];
        assert!(peak.bin.abs_diff(50) <= 1);
        assert!(peak.wavelength_nm.abs_diff(565) <= 5);
        assert!((peak.value - 0.8).abs() < 0.05);
    }

    #[test]
    fn test_flat_profile_has_no_peaks() {
        let profile = vec![0.5; NUM_BINS];
        assert!(detect_peaks(&profile, &PeakConfig::default()).is_empty());
    }

    #[test]
    fn test_sub_threshold_bump_is_ignored() {
        let profile = gaussian_bump(50, 0.04, 3.0);
        assert!(detect_peaks(&profile, &PeakConfig::default()).is_empty());
    }

    #[test]
    fn test_first_come_blocks_later_larger_peak() {
        // Two bumps closer together than the separation window; the
        // earlier, smaller one wins.
        let mut profile = gaussian_bump(45, 0.3, 1.5);
        for (i, v) in gaussian_bump(53, 0.9, 1.5).iter().enumerate() {
            profile[i] += v;
        }
        let config = PeakConfig {
            min_separation_px: 60.0,
            ..PeakConfig::default()
        };
        let peaks = detect_peaks(&profile, &config);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].bin, 45);
        // With the canonical window the bumps are far enough apart.
        let both = detect_peaks(&profile, &PeakConfig::default());
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_distant_bumps_both_reported() {
        let mut profile = gaussian_bump(25, 0.5, 2.0);
        for (i, v) in gaussian_bump(75, 0.7, 2.0).iter().enumerate() {
            profile[i] += v;
        }
        let peaks = detect_peaks(&profile, &PeakConfig::default());
        assert_eq!(peaks.len(), 2);
        assert!(peaks[0].bin < peaks[1].bin);
    }

    #[test]
    fn test_short_profile_is_empty() {
        assert!(detect_peaks(&[1.0, 2.0, 1.0], &PeakConfig::default()).is_empty());
    }
}
