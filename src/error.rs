//! Error types for the `cepstrum` crate.

use thiserror::Error;

/// A configuration value was rejected.
///
/// The configuration that was in effect before the rejected change stays
/// active.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is outside its allowed range.
    #[error("{field} = {value} is out of range (allowed: {allowed})")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// Human readable allowed range.
        allowed: &'static str,
    },

    /// No preset is registered under this name.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

impl ConfigError {
    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl ToString,
        allowed: &'static str,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            allowed,
        }
    }
}

/// The stream descriptor handed to [`crate::Cepstrum::setup`] is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The sample format is not one of S16, S24, S32, F32 or F64.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The stream reports zero channels.
    #[error("Stream reports 0 audio channels")]
    NoChannels,

    /// The stream reports a zero sample rate.
    #[error("Stream reports a sample rate of 0 Hz")]
    ZeroRate,
}

/// Failure while processing a chunk.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `process` was called before a stream format was set up.
    #[error("No stream format negotiated; call setup() first")]
    NotNegotiated,

    /// The FFT backend rejected a buffer.
    #[error("FFT failed: {0}")]
    Fft(#[from] realfft::FftError),
}
