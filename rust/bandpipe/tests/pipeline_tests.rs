use bandpipe::{
    NUM_BINS,
    PeakConfig,
    PixelBlock,
    bin_to_wavelength,
    compute_absorbance,
    detect_peaks,
    process_frame,
};

#[test]
fn test_uniform_halving_gives_log_half_absorbance() {
    // Reference at (200, 200, 200), sample at (100, 100, 100): every
    // channel halves, so the absorbance is -log10(0.5) outside the red
    // correction band and dampened inside it.
    let reference_block = PixelBlock::uniform(100, 20, (200, 200, 200));
    let sample_block = PixelBlock::uniform(100, 20, (100, 100, 100));

    let reference = process_frame(&reference_block, None).unwrap();
    let sample = process_frame(&sample_block, None).unwrap();
    let absorbance = compute_absorbance(&reference, &sample).unwrap();

    let expected = 0.5f64.log10().abs(); // ~0.301
    for (bin, &a) in absorbance.iter().enumerate() {
        let nm = bin_to_wavelength(bin, NUM_BINS);
        if !(600..700).contains(&nm) {
            assert!(
                (a - expected).abs() < 1e-6,
                "bin {} at {} nm: {} vs {}",
                bin,
                nm,
                a,
                expected
            );
        } else {
            assert!(a < expected, "bin {} at {} nm should be dampened", bin, nm);
        }
    }
}

#[test]
fn test_self_calibrated_frame_degenerates_to_zero_absorbance() {
    // A green-only block calibrated against itself subtracts to exactly
    // zero everywhere (the green noise factor is above 1.0), so using it
    // as the reference must yield zero absorbance, never NaN or infinity.
    let block = PixelBlock::uniform(100, 20, (0, 180, 0));
    let reference = process_frame(&block, Some(&block.clone())).unwrap();
    assert!(reference.iter().all(|&v| v == 0.0));

    let sample_block = PixelBlock::uniform(100, 20, (90, 90, 90));
    let sample = process_frame(&sample_block, None).unwrap();
    let absorbance = compute_absorbance(&reference, &sample).unwrap();
    assert!(absorbance.iter().all(|&a| a == 0.0));
}

#[test]
fn test_calibration_width_mismatch_fails_the_frame() {
    let block = PixelBlock::uniform(100, 20, (150, 150, 150));
    let calibration = PixelBlock::uniform(80, 20, (10, 10, 10));
    assert!(process_frame(&block, Some(&calibration)).is_err());
}

#[test]
fn test_absorbance_of_profile_with_itself_is_zero() {
    let block = PixelBlock::uniform(120, 16, (90, 140, 200));
    let profile = process_frame(&block, None).unwrap();
    assert!(profile.iter().all(|&v| v > 0.0));
    let absorbance = compute_absorbance(&profile, &profile).unwrap();
    assert!(absorbance.iter().all(|&a| a == 0.0));
}

#[test]
fn test_full_chain_finds_an_absorbance_peak() {
    // Sample identical to the reference except a Gaussian-shaped dark band
    // centered on column 50, which shows up as an absorbance peak there.
    let reference_block = PixelBlock::uniform(100, 20, (200, 200, 200));
    let mut data = Vec::with_capacity(100 * 20 * 4);
    for _y in 0..20 {
        for x in 0..100u32 {
            let d = x as f64 - 50.0;
            let value = (200.0 - 100.0 * (-(d * d) / 18.0).exp()).round() as u8;
            data.extend_from_slice(&[value, value, value, 255]);
        }
    }
    let sample_block = PixelBlock::from_rgba(100, 20, data).unwrap();

    let reference = process_frame(&reference_block, None).unwrap();
    let sample = process_frame(&sample_block, None).unwrap();
    let absorbance = compute_absorbance(&reference, &sample).unwrap();

    let peaks = detect_peaks(&absorbance, &PeakConfig::default());
    assert_eq!(peaks.len(), 1, "peaks: {:?}", peaks);
    assert!(
        peaks[0].bin.abs_diff(50) <= 2,
        "peak at bin {}",
        peaks[0].bin
    );
    assert!((peaks[0].value - 0.5f64.log10().abs()).abs() < 0.05);
}

#[test]
fn test_dark_block_produces_empty_profile() {
    // Every texel is under the dark threshold, so no bin gets a count and
    // the whole chain stays at zero.
    let block = PixelBlock::uniform(100, 20, (5, 5, 5));
    let profile = process_frame(&block, None).unwrap();
    assert!(profile.iter().all(|&v| v == 0.0));
}
