//! Gaussian smoothing with edge truncation.

/// Convolves a profile with a kernel, dropping taps that fall outside the
/// profile and renormalizing the surviving weights. The output at the
/// edges is still a weighted average of the available neighbors instead of
/// being darkened by zero padding.
///
/// Non-finite input values count as zero; the output is always finite and
/// non-negative for non-negative inputs.
pub fn smooth(profile: &[f64], kernel: &[f64]) -> Vec<f64> {
    let len = profile.len();
    let half = kernel.len() / 2;
    let mut out = Vec::with_capacity(len);

    for i in 0..len {
        let mut acc = 0.0;
        let mut weight = 0.0;
        for (tap, &w) in kernel.iter().enumerate() {
            let j = i as isize + tap as isize - half as isize;
            if j < 0 || j >= len as isize {
                continue;
            }
            let value = profile[j as usize];
            if value.is_finite() {
                acc += value * w;
            }
            weight += w;
        }
        if weight > 0.0 {
            out.push((acc / weight).max(0.0));
        } else {
            out.push(0.0);
        }
    }

    out
}
