//! Absorbance derivation from a reference and a sample profile.

use crate::errors::{
    BandpipeError,
    Result,
};
use crate::wavelength::bin_to_wavelength;

/// Center of the red-channel over-sensitivity correction band.
pub const RED_CORRECTION_CENTER_NM: f64 = 650.0;

/// Half-width of the correction band; the correction only applies within
/// `|wavelength - center| < half_width`.
pub const RED_CORRECTION_HALF_WIDTH_NM: f64 = 50.0;

/// Depth of the correction at the band center. Empirically tuned against
/// the camera sensor, not physically derived.
pub const RED_CORRECTION_DEPTH: f64 = 0.7;

/// Upper clamp of every absorbance value.
pub const MAX_ABSORBANCE: f64 = 1.0;

/// Derives an absorbance profile from same-length reference and sample
/// intensity profiles.
///
/// Per bin: a non-positive (or non-finite) reference or sample intensity
/// yields zero absorbance for that bin, the unmeasurable case is never a
/// NaN. Otherwise `|-log10(sample / reference)| * c` clamped to
/// [`MAX_ABSORBANCE`], where `c` dampens the 600-700 nm band for the red
/// channel's over-sensitivity. The absolute value and the clamp are the
/// display-range contract of this pipeline, not Beer-Lambert behavior.
pub fn compute_absorbance(reference: &[f64], sample: &[f64]) -> Result<Vec<f64>> {
    if reference.len() != sample.len() {
        return Err(BandpipeError::ProfileLengthMismatch {
            expected: reference.len(),
            got: sample.len(),
        });
    }

    let num_bins = reference.len();
    let out = reference
        .iter()
        .zip(sample.iter())
        .enumerate()
        .map(|(bin, (&r, &s))| {
            if !r.is_finite() || !s.is_finite() || r <= 0.0 || s <= 0.0 {
                return 0.0;
            }
            let correction = red_band_correction(bin_to_wavelength(bin, num_bins));
            (-(s / r).log10() * correction).abs().min(MAX_ABSORBANCE)
        })
        .collect();

    Ok(out)
}

/// Correction factor for one wavelength: 1.0 outside the band, dipping
/// linearly to `1.0 - RED_CORRECTION_DEPTH` (0.3) exactly at the center.
fn red_band_correction(wavelength_nm: u32) -> f64 {
    let distance = (wavelength_nm as f64 - RED_CORRECTION_CENTER_NM).abs();
    if distance >= RED_CORRECTION_HALF_WIDTH_NM {
        return 1.0;
    }
    1.0 - RED_CORRECTION_DEPTH * (1.0 - distance / RED_CORRECTION_HALF_WIDTH_NM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NUM_BINS;

    #[test]
    fn test_identical_profiles_give_zero_absorbance() {
        let profile = vec![3.7; NUM_BINS];
        let absorbance = compute_absorbance(&profile, &profile).unwrap();
        assert!(absorbance.iter().all(|&a| a == 0.0));
    }

    #[test]
    fn test_output_is_always_in_unit_range() {
        let reference = vec![1000.0; NUM_BINS];
        // Ratios from very absorbing to amplifying.
        for sample_value in [0.001, 0.5, 10.0, 999.0, 5000.0] {
            let sample = vec![sample_value; NUM_BINS];
            let absorbance = compute_absorbance(&reference, &sample).unwrap();
            assert!(absorbance.iter().all(|&a| (0.0..=1.0).contains(&a)));
        }
    }

    #[test]
    fn test_degenerate_bins_yield_zero_not_nan() {
        let reference = vec![0.0, -1.0, f64::NAN, 100.0];
        let sample = vec![50.0, 50.0, 50.0, 0.0];
        let absorbance = compute_absorbance(&reference, &sample).unwrap();
        assert_eq!(absorbance, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let reference = vec![1.0; NUM_BINS];
        let sample = vec![1.0; NUM_BINS - 1];
        assert_eq!(
            compute_absorbance(&reference, &sample),
            Err(BandpipeError::ProfileLengthMismatch {
                expected: NUM_BINS,
                got: NUM_BINS - 1,
            })
        );
    }

    #[test]
    fn test_red_band_correction_shape() {
        assert_eq!(red_band_correction(500), 1.0);
        assert_eq!(red_band_correction(600), 1.0);
        assert_eq!(red_band_correction(700), 1.0);
        // Minimum exactly at the center.
        assert!((red_band_correction(650) - 0.3).abs() < 1e-12);
        // Halfway into the band.
        assert!((red_band_correction(625) - 0.65).abs() < 1e-12);
        assert!(red_band_correction(625) < red_band_correction(610));
    }

    #[test]
    fn test_half_ratio_outside_band() {
        let reference = vec![200.0; NUM_BINS];
        let sample = vec![100.0; NUM_BINS];
        let absorbance = compute_absorbance(&reference, &sample).unwrap();
        let expected = 0.5f64.log10().abs();
        for (bin, &a) in absorbance.iter().enumerate() {
            let nm = bin_to_wavelength(bin, NUM_BINS);
            if (nm as f64 - RED_CORRECTION_CENTER_NM).abs() >= RED_CORRECTION_HALF_WIDTH_NM {
                assert!((a - expected).abs() < 1e-9, "bin {} at {} nm", bin, nm);
            } else {
                assert!(a < expected, "bin {} at {} nm should be dampened", bin, nm);
            }
        }
    }
}
