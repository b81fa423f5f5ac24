//! Streaming MFCC analysis stages
//!
//! - Ring buffering of decoded samples per channel
//! - Spectral analysis (pre-emphasis, Hamming window, real FFT, power)
//! - Mel filterbank
//! - Cepstral closeout (log energies + DCT-II)

mod cepstral;
mod channel;
mod mel;
mod ring;
mod spectral;

pub use cepstral::compute_coefficients;
pub use channel::ChannelState;
pub use mel::{hz_to_mel, mel_to_hz, MelFilterbank, LOG_FLOOR};
pub use ring::FrameRingBuffer;
pub use spectral::SpectralAnalyzer;
