use std::fmt::Display;

/// Custom error types for the pipeline.
///
/// Only structural failures are errors: a calibration frame that does not
/// match the block it calibrates, or reference/sample profiles of different
/// lengths. Bad values inside otherwise well-shaped inputs (NaN texels,
/// zero intensities in an absorbance ratio) are corrected in place to zero
/// by the stage that encounters them and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandpipeError {
    /// The calibration frame does not have the same dimensions as the
    /// block being calibrated. Per-texel noise alignment would be garbage,
    /// so the whole call fails.
    CalibrationDimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// Reference and sample profiles of different lengths were passed to
    /// the absorbance calculator.
    ProfileLengthMismatch { expected: usize, got: usize },
    /// A pixel buffer whose length does not match `4 * width * height`.
    BlockShape {
        width: usize,
        height: usize,
        len: usize,
    },
}

impl Display for BandpipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type Result<T> = std::result::Result<T, BandpipeError>;
