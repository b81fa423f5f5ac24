// src/config/settings.rs
//
// Analysis configuration, range validation and named presets.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One second in nanoseconds.
pub const SECOND_NS: u64 = 1_000_000_000;

/// Largest accepted sample rate in Hz
pub const MAX_SAMPLE_RATE: u32 = 92_000;
/// Largest accepted fft/window/hop size
pub const MAX_FFT_SIZE: usize = 4096;
/// Largest accepted number of cepstral coefficients
pub const MAX_NUM_COEFFS: usize = 512;

/// Complete analysis configuration.
///
/// `fft_size` counts one-sided spectral bins, so the transform itself runs
/// over [`frame_length`](Self::frame_length) `= 2 * fft_size - 2` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CepstrumConfig {
    /// Sample rate the mel filterbank is laid out for (Hz)
    pub sample_rate: u32,
    /// Number of one-sided FFT bins
    pub fft_size: usize,
    /// Hamming window length
    pub window_size: usize,
    /// Hop size (validated, does not change the FFT cadence)
    pub hop_size: usize,
    /// Number of cepstral coefficients emitted per channel
    pub num_coeffs: usize,
    /// Apply the pre-emphasis filter before windowing
    pub use_preemphasis: bool,
    /// Pre-emphasis coefficient (0.0-1.0)
    pub preemphasis_coeff: f32,
    /// Emit one coefficient vector per channel instead of a mono mix
    pub multi_channel: bool,
    /// Time between emitted results, in nanoseconds
    pub interval_ns: u64,
    /// Produce result messages at all
    pub post_messages: bool,
}

impl Default for CepstrumConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            fft_size: 512,
            window_size: 512,
            hop_size: 256,
            num_coeffs: 13,
            use_preemphasis: true,
            preemphasis_coeff: 0.97,
            multi_channel: false,
            interval_ns: SECOND_NS / 10,
            post_messages: true,
        }
    }
}

impl CepstrumConfig {
    /// Build the configuration for a named preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Speech => Self::default(),
            Preset::Music => Self {
                sample_rate: 44_100,
                fft_size: 1025,
                window_size: 2048,
                hop_size: 1024,
                num_coeffs: 20,
                interval_ns: SECOND_NS / 20,
                ..Self::default()
            },
        }
    }

    /// Number of mel filters, always twice the coefficient count
    pub fn num_filters(&self) -> usize {
        2 * self.num_coeffs
    }

    /// Real transform length whose one-sided spectrum has `fft_size` bins
    pub fn frame_length(&self) -> usize {
        2 * self.fft_size - 2
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(ConfigError::out_of_range(
                "sample_rate",
                self.sample_rate,
                "1..=92000",
            ));
        }
        // a single bin would give a zero-length transform
        if self.fft_size < 2 || self.fft_size > MAX_FFT_SIZE {
            return Err(ConfigError::out_of_range("fft_size", self.fft_size, "2..=4096"));
        }
        if self.window_size == 0 || self.window_size > MAX_FFT_SIZE {
            return Err(ConfigError::out_of_range(
                "window_size",
                self.window_size,
                "1..=4096",
            ));
        }
        if self.hop_size == 0 || self.hop_size > MAX_FFT_SIZE {
            return Err(ConfigError::out_of_range("hop_size", self.hop_size, "1..=4096"));
        }
        if self.num_coeffs == 0 || self.num_coeffs > MAX_NUM_COEFFS {
            return Err(ConfigError::out_of_range(
                "num_coeffs",
                self.num_coeffs,
                "1..=512",
            ));
        }
        if self.interval_ns == 0 {
            return Err(ConfigError::out_of_range("interval_ns", 0, ">= 1"));
        }
        if !(0.0..=1.0).contains(&self.preemphasis_coeff) {
            return Err(ConfigError::out_of_range(
                "preemphasis_coeff",
                self.preemphasis_coeff,
                "0.0..=1.0",
            ));
        }
        Ok(())
    }

    /// Whether moving from `self` to `other` invalidates channel state.
    ///
    /// Only `post_messages`, `use_preemphasis` and `preemphasis_coeff` can
    /// change without reallocating buffers and rebuilding the filterbank.
    pub fn requires_reset(&self, other: &Self) -> bool {
        self.sample_rate != other.sample_rate
            || self.fft_size != other.fft_size
            || self.window_size != other.window_size
            || self.hop_size != other.hop_size
            || self.num_coeffs != other.num_coeffs
            || self.multi_channel != other.multi_channel
            || self.interval_ns != other.interval_ns
    }
}

/// Named starting points for common material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// 16 kHz speech, 13 coefficients every 100 ms
    Speech,
    /// 44.1 kHz music, 20 coefficients every 50 ms
    Music,
}

impl Preset {
    pub fn all() -> Vec<Self> {
        vec![Self::Speech, Self::Music]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::Music => "music",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Speech => "16 kHz speech, 1022-sample frames, 13 coefficients every 100 ms",
            Self::Music => "44.1 kHz music, 2048-sample frames, 20 coefficients every 50 ms",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_lowercase().as_str() {
            "speech" | "default" => Ok(Self::Speech),
            "music" => Ok(Self::Music),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }
}
