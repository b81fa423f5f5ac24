//! Real-input FFT and power spectrum accumulation

use std::sync::Arc;

use num_complex::Complex32;
use realfft::{FftError, RealFftPlanner, RealToComplex};

/// Forward real-to-complex transform of a fixed length
pub struct FftProcessor {
    fft: Arc<dyn RealToComplex<f32>>,
    scratch: Vec<Complex32>,
    frame_length: usize,
}

impl FftProcessor {
    pub fn new(frame_length: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_length);
        let scratch = fft.make_scratch_vec();
        Self {
            fft,
            scratch,
            frame_length,
        }
    }

    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Number of one-sided output bins
    pub fn num_bins(&self) -> usize {
        self.frame_length / 2 + 1
    }

    /// Run the transform. `input` doubles as work space and is left unspecified.
    pub fn forward(&mut self, input: &mut [f32], output: &mut [Complex32]) -> Result<(), FftError> {
        self.fft.process_with_scratch(input, output, &mut self.scratch)
    }
}

/// Add `|X[k]|^2 / frame_length^2` of every bin onto `power`.
pub fn accumulate_power(spectrum: &[Complex32], power: &mut [f32], frame_length: usize) {
    let norm = frame_length as f64 * frame_length as f64;
    for (p, c) in power.iter_mut().zip(spectrum) {
        let re = c.re as f64;
        let im = c.im as f64;
        *p += ((re * re + im * im) / norm) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_dc_power() {
        let mut fft = FftProcessor::new(8);
        let mut input = vec![0.5f32; 8];
        let mut spectrum = vec![Complex32::new(0.0, 0.0); fft.num_bins()];
        fft.forward(&mut input, &mut spectrum).unwrap();

        let mut power = vec![0.0f32; 5];
        accumulate_power(&spectrum, &mut power, 8);
        assert!((power[0] - 0.25).abs() < 1e-6);
        assert!(power[1..].iter().all(|&p| p < 1e-10));
    }

    #[test]
    fn test_power_accumulates() {
        let n = 64;
        let mut fft = FftProcessor::new(n);
        let mut spectrum = vec![Complex32::new(0.0, 0.0); fft.num_bins()];
        let mut power = vec![0.0f32; fft.num_bins()];

        for _ in 0..3 {
            // bin-centred sine with amplitude 1.0 puts 1/4 into bin 5
            let mut input: Vec<f32> = (0..n)
                .map(|i| (2.0 * PI * 5.0 * i as f32 / n as f32).sin())
                .collect();
            fft.forward(&mut input, &mut spectrum).unwrap();
            accumulate_power(&spectrum, &mut power, n);
        }

        assert!((power[5] - 0.75).abs() < 1e-4);
        assert!(power[4] < 1e-6 && power[6] < 1e-6);
    }

    #[test]
    fn test_wrong_length_is_an_error() {
        let mut fft = FftProcessor::new(16);
        let mut input = vec![0.0f32; 10];
        let mut spectrum = vec![Complex32::new(0.0, 0.0); fft.num_bins()];
        assert!(fft.forward(&mut input, &mut spectrum).is_err());
    }
}
