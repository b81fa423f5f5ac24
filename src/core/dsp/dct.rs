//! Discrete cosine transform

use std::f64::consts::PI;

/// Unnormalized DCT-II.
///
/// `output[k] = sum_n input[n] * cos(pi * k * (n + 0.5) / input.len())` for
/// every `k < output.len()`. The output may be shorter than the input, which
/// truncates the transform to its low-quefrency terms.
pub fn dct_ii(input: &[f32], output: &mut [f32]) {
    let size = input.len() as f64;
    for (k, out) in output.iter_mut().enumerate() {
        let mut acc = 0.0f64;
        for (n, &x) in input.iter().enumerate() {
            acc += x as f64 * (PI * k as f64 * (n as f64 + 0.5) / size).cos();
        }
        *out = acc as f32;
    }
}
