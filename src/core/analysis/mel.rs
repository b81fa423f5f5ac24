// src/core/analysis/mel.rs
//
// Triangular mel-scale filterbank over the one-sided FFT bins.

use crate::config::CepstrumConfig;

/// Added to every filter energy before the logarithm so silence stays finite
pub const LOG_FLOOR: f64 = 1e-10;

/// Convert frequency in Hz to the mel scale.
#[inline]
pub fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel back to Hz.
#[inline]
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10f64.powf(mel / 2595.0) - 1.0)
}

/// Precomputed triangular filters.
///
/// Filters are defined only on the `frame_length / 2 + 1` one-sided bins;
/// edge bins past that range are clamped onto the last bin.
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    /// `num_filters + 2` bin indices, non-decreasing
    edges: Vec<usize>,
    weights: Vec<Vec<f32>>,
    num_bins: usize,
}

impl MelFilterbank {
    pub fn new(sample_rate: u32, frame_length: usize, num_filters: usize) -> Self {
        let num_bins = frame_length / 2 + 1;
        let rate = sample_rate as f64;

        let low_mel = hz_to_mel(0.0);
        let high_mel = hz_to_mel(rate / 2.0);
        let mel_step = (high_mel - low_mel) / (num_filters + 1) as f64;

        let edges: Vec<usize> = (0..num_filters + 2)
            .map(|i| {
                let hz = mel_to_hz(low_mel + i as f64 * mel_step);
                let bin = ((frame_length + 1) as f64 * hz / rate).floor().max(0.0) as usize;
                bin.min(num_bins - 1)
            })
            .collect();

        let weights = (1..=num_filters)
            .map(|i| triangle(edges[i - 1], edges[i], edges[i + 1], num_bins))
            .collect();

        Self {
            edges,
            weights,
            num_bins,
        }
    }

    pub fn from_config(config: &CepstrumConfig) -> Self {
        Self::new(config.sample_rate, config.frame_length(), config.num_filters())
    }

    pub fn num_filters(&self) -> usize {
        self.weights.len()
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Bin edges; filter `i` spans `edges[i]..=edges[i + 2]` and peaks at `edges[i + 1]`
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    pub fn filter(&self, index: usize) -> Option<&[f32]> {
        self.weights.get(index).map(Vec::as_slice)
    }

    /// Write `ln(sum(weight * power) + LOG_FLOOR)` for every filter into `energies`.
    pub fn apply(&self, power: &[f32], energies: &mut [f32]) {
        for (energy, weights) in energies.iter_mut().zip(&self.weights) {
            let sum: f64 = weights
                .iter()
                .zip(power)
                .map(|(&w, &p)| w as f64 * p as f64)
                .sum();
            *energy = (sum + LOG_FLOOR).ln() as f32;
        }
    }
}

/// Rising edge on `[left, center)`, 1.0 at `center`, falling edge on `(center, right)`
fn triangle(left: usize, center: usize, right: usize, num_bins: usize) -> Vec<f32> {
    let mut w = vec![0.0f32; num_bins];
    for k in left..center {
        w[k] = (k - left) as f32 / (center - left) as f32;
    }
    w[center] = 1.0;
    for k in center + 1..right {
        w[k] = (right - k) as f32 / (right - center) as f32;
    }
    w
}
