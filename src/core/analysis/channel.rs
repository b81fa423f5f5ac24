// src/core/analysis/channel.rs
//
// Per-channel working buffers, all sized from one configuration.

use num_complex::Complex32;

use super::ring::FrameRingBuffer;
use crate::config::CepstrumConfig;

/// Buffers owned by one analysed channel
#[derive(Debug, Clone)]
pub struct ChannelState {
    pub(crate) ring: FrameRingBuffer,
    /// Pre-emphasized, windowed copy of the frame handed to the FFT
    pub(crate) scratch: Vec<f32>,
    pub(crate) spectrum: Vec<Complex32>,
    /// Power spectrum summed over every FFT of the current interval
    pub(crate) power: Vec<f32>,
    /// Log filterbank energies
    pub(crate) energies: Vec<f32>,
    pub(crate) coeffs: Vec<f32>,
}

impl ChannelState {
    pub fn new(config: &CepstrumConfig) -> Self {
        let frame_length = config.frame_length();
        Self {
            ring: FrameRingBuffer::new(frame_length),
            scratch: vec![0.0; frame_length],
            spectrum: vec![Complex32::new(0.0, 0.0); config.fft_size],
            power: vec![0.0; config.fft_size],
            energies: vec![0.0; config.num_filters()],
            coeffs: vec![0.0; config.num_coeffs],
        }
    }

    pub fn ring(&self) -> &FrameRingBuffer {
        &self.ring
    }

    #[cfg(test)]
    pub(crate) fn ring_mut(&mut self) -> &mut FrameRingBuffer {
        &mut self.ring
    }

    pub fn power_spectrum(&self) -> &[f32] {
        &self.power
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coeffs
    }

    /// Zero the interval accumulators. The ring keeps its samples.
    pub fn reset_interval(&mut self) {
        self.power.fill(0.0);
        self.energies.fill(0.0);
        self.coeffs.fill(0.0);
    }
}
