use serde::{
    Deserialize,
    Serialize,
};

/// A locally dominant maximum reported by the peak detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Approximate wavelength of the peak, nearest integer nanometer.
    pub wavelength_nm: u32,
    /// Profile value at the peak, in the scale of the input profile.
    pub value: f64,
    /// Bin index the peak was found at.
    pub bin: usize,
}
