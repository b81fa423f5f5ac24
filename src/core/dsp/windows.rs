//! Window function implementations

use std::f32::consts::PI;

/// Symmetric Hamming window of `size` points
pub fn hamming(size: usize) -> Vec<f32> {
    if size == 1 {
        return vec![1.0];
    }
    let denom = (size - 1) as f32;
    (0..size)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / denom).cos())
        .collect()
}

/// Multiply `samples` element-wise by `window`.
///
/// Only the overlapping prefix is touched.
pub fn apply_window(samples: &mut [f32], window: &[f32]) {
    for (s, w) in samples.iter_mut().zip(window) {
        *s *= w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_window() {
        let window = hamming(5);
        assert!((window[0] - 0.08).abs() < 1e-6);
        assert!((window[2] - 1.0).abs() < 1e-6);
        assert!((window[4] - 0.08).abs() < 1e-6);
        assert!((window[1] - window[3]).abs() < 1e-6);
    }

    #[test]
    fn test_apply_window_prefix() {
        let mut samples = vec![1.0f32; 4];
        apply_window(&mut samples, &[0.5, 0.25]);
        assert_eq!(samples, vec![0.5, 0.25, 1.0, 1.0]);
    }
}
