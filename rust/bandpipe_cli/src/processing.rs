use crate::config::OutputConfig;
use crate::errors::CliError;
use crate::frames::{
    collect_frame_paths,
    load_pixel_block,
};
use bandpipe::{
    Peak,
    PeakConfig,
    PixelBlock,
    bin_to_wavelength,
    compute_absorbance,
    detect_peaks,
    process_frame,
};
use indicatif::{
    ParallelProgressIterator,
    ProgressStyle,
};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{
    info,
    warn,
};

/// Processes one reference/sample pair and writes `spectrum.csv` plus
/// `peaks.json` into the output directory.
pub fn process_single(
    reference_path: &Path,
    sample_path: &Path,
    dark_frame_path: Option<&Path>,
    peak_config: &PeakConfig,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let dark_frame = dark_frame_path.map(load_pixel_block).transpose()?;
    let reference_block = load_pixel_block(reference_path)?;
    let sample_block = load_pixel_block(sample_path)?;

    let result = analyze_pair(
        &reference_block,
        &sample_block,
        dark_frame.as_ref(),
        peak_config,
    )?;

    let csv_path = output.directory.join("spectrum.csv");
    write_profile_csv(&csv_path, &result)?;
    info!("Wrote spectrum to {:?}", csv_path);

    let peaks_path = output.directory.join("peaks.json");
    write_peaks_json(&peaks_path, &result.peaks)?;
    for peak in &result.peaks {
        info!(
            "Peak at {} nm (bin {}): {:.4}",
            peak.wavelength_nm, peak.bin, peak.value
        );
    }
    if result.peaks.is_empty() {
        info!("No peaks above threshold");
    }
    Ok(())
}

/// Processes every frame in a directory against one reference, writing a
/// CSV per frame. Frames are independent, so they run in parallel.
pub fn process_batch(
    reference_path: &Path,
    sample_dir: &Path,
    dark_frame_path: Option<&Path>,
    peak_config: &PeakConfig,
    output: &OutputConfig,
) -> Result<(), CliError> {
    let dark_frame = dark_frame_path.map(load_pixel_block).transpose()?;
    let reference_block = load_pixel_block(reference_path)?;

    let frame_paths = collect_frame_paths(sample_dir)?;
    if frame_paths.is_empty() {
        return Err(CliError::Config {
            source: format!("No frame images found in {:?}", sample_dir),
        });
    }
    info!("Processing {} frames from {:?}", frame_paths.len(), sample_dir);

    let start = Instant::now();
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap();

    let nwritten: usize = frame_paths
        .par_iter()
        .progress_with_style(style)
        .map(|path| {
            let outcome = load_pixel_block(path).and_then(|sample_block| {
                analyze_pair(
                    &reference_block,
                    &sample_block,
                    dark_frame.as_ref(),
                    peak_config,
                )
            });
            match outcome {
                Ok(result) => {
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| "frame".to_string());
                    let csv_path = output.directory.join(format!("{}.csv", stem));
                    match write_profile_csv(&csv_path, &result) {
                        Ok(()) => 1,
                        Err(e) => {
                            warn!("Failed to write {:?}: {}", csv_path, e);
                            0
                        }
                    }
                }
                Err(e) => {
                    warn!("Skipping frame {:?}: {}", path, e);
                    0
                }
            }
        })
        .sum();

    println!(
        "Processed {} frames, wrote {} spectra in {:?}",
        frame_paths.len(),
        nwritten,
        start.elapsed()
    );
    Ok(())
}

pub struct PairAnalysis {
    pub reference: Vec<f64>,
    pub sample: Vec<f64>,
    pub absorbance: Vec<f64>,
    pub peaks: Vec<Peak>,
}

fn analyze_pair(
    reference_block: &PixelBlock,
    sample_block: &PixelBlock,
    dark_frame: Option<&PixelBlock>,
    peak_config: &PeakConfig,
) -> Result<PairAnalysis, CliError> {
    let reference = process_frame(reference_block, dark_frame)?;
    let sample = process_frame(sample_block, dark_frame)?;
    let absorbance = compute_absorbance(&reference, &sample)?;
    let peaks = detect_peaks(&absorbance, peak_config);
    Ok(PairAnalysis {
        reference,
        sample,
        absorbance,
        peaks,
    })
}

/// Four columns per bin: wavelength, both intensities at two decimal
/// places, absorbance at four.
fn write_profile_csv(path: &Path, result: &PairAnalysis) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    writer.write_record([
        "wavelength_nm",
        "reference_intensity",
        "sample_intensity",
        "absorbance",
    ])?;
    let num_bins = result.reference.len();
    for bin in 0..num_bins {
        writer.write_record([
            bin_to_wavelength(bin, num_bins).to_string(),
            format!("{:.2}", result.reference[bin]),
            format!("{:.2}", result.sample[bin]),
            format!("{:.4}", result.absorbance[bin]),
        ])?;
    }
    writer.flush().map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    Ok(())
}

fn write_peaks_json(path: &Path, peaks: &[Peak]) -> Result<(), CliError> {
    let file = std::fs::File::create(path).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    serde_json::to_writer_pretty(file, peaks).map_err(|e| CliError::Io {
        source: e.to_string(),
        path: Some(path.to_string_lossy().to_string()),
    })?;
    Ok(())
}
