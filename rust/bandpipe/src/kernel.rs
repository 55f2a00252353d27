//! Gaussian convolution kernel construction.

/// Kernel size of the primary pipeline smoothing pass.
pub const SMOOTH_KERNEL_SIZE: usize = 5;

/// Sigma of the primary pipeline smoothing pass.
pub const SMOOTH_SIGMA: f64 = 1.0;

/// Sigma of the wider display smoothing pass.
pub const DISPLAY_SIGMA: f64 = 1.5;

/// Smallest sigma the builder will work with. Values at or below zero are
/// clamped here instead of being rejected, which keeps the builder a pure
/// function with no failure path; the resulting kernel is an impulse.
pub const MIN_SIGMA: f64 = 1e-6;

/// Builds a normalized Gaussian kernel of odd `size`.
///
/// Weights are `exp(-(x - mean)^2 / (2 * sigma^2))` centered at
/// `mean = size / 2` and normalized to sum to 1.0.
///
/// # Example
///
/// ```
/// use bandpipe::kernel::gaussian_kernel;
///
/// let kernel = gaussian_kernel(5, 1.0);
/// let total: f64 = kernel.iter().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// assert!(kernel[2] > kernel[1] && kernel[1] > kernel[0]);
/// ```
pub fn gaussian_kernel(size: usize, sigma: f64) -> Vec<f64> {
    debug_assert!(size % 2 == 1, "kernel size must be odd, got {}", size);
    let sigma = sigma.max(MIN_SIGMA);
    let mean = (size / 2) as f64;
    let mut weights: Vec<f64> = (0..size)
        .map(|x| {
            let d = x as f64 - mean;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= total;
    }
    weights
}

/// The kernel used by the primary pipeline smoothing pass.
pub fn pipeline_kernel() -> Vec<f64> {
    gaussian_kernel(SMOOTH_KERNEL_SIZE, SMOOTH_SIGMA)
}

/// The wider kernel used when smoothing for live display. Size is derived
/// from sigma so three standard deviations fit on each side.
pub fn display_kernel() -> Vec<f64> {
    let size = (DISPLAY_SIGMA * 3.0).ceil() as usize * 2 + 1;
    gaussian_kernel(size, DISPLAY_SIGMA)
}
