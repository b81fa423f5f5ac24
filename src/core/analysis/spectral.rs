// src/core/analysis/spectral.rs
//
// Short-time spectral analysis of the ring buffer contents.
// Each pass pre-emphasizes and windows the current frame, runs a real FFT
// and adds the normalized power spectrum onto the channel accumulator.

use realfft::FftError;

use super::channel::ChannelState;
use crate::config::CepstrumConfig;
use crate::core::dsp::{accumulate_power, apply_window, hamming, pre_emphasis, FftProcessor};

/// FFT plan and window shared by every channel of one configuration
pub struct SpectralAnalyzer {
    fft: FftProcessor,
    window: Vec<f32>,
}

impl SpectralAnalyzer {
    pub fn new(config: &CepstrumConfig) -> Self {
        let frame_length = config.frame_length();
        // windows longer than the frame are cut to it, the rest is zero padded
        let window_len = config.window_size.min(frame_length);
        Self {
            fft: FftProcessor::new(frame_length),
            window: hamming(window_len),
        }
    }

    pub fn frame_length(&self) -> usize {
        self.fft.frame_length()
    }

    /// Number of samples that are windowed; the rest of the frame is zeroed
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Analyse the frame currently held in `channel`'s ring buffer.
    ///
    /// `preemphasis` carries the filter coefficient when enabled.
    pub fn analyze(&mut self, channel: &mut ChannelState, preemphasis: Option<f32>) -> Result<(), FftError> {
        let w = self.window.len();
        let frame_length = self.fft.frame_length();

        channel.ring.copy_chronological(&mut channel.scratch[..w]);
        channel.scratch[w..].fill(0.0);

        if let Some(alpha) = preemphasis {
            pre_emphasis(&mut channel.scratch[..w], alpha);
        }
        apply_window(&mut channel.scratch[..w], &self.window);

        self.fft.forward(&mut channel.scratch, &mut channel.spectrum)?;
        accumulate_power(&channel.spectrum, &mut channel.power, frame_length);

        Ok(())
    }
}
