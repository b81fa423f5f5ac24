//! cepstrum - Streaming MFCC analysis of raw PCM audio
//!
//! Accepts interleaved PCM in chunks of any size, keeps a rolling analysis
//! frame per channel and emits one vector of Mel-frequency cepstral
//! coefficients per fixed time interval.
//!
//! ## Module Structure
//!
//! - `core` - Sample decoding, DSP, interval scheduling and the engine
//! - `config` - Analysis configuration and presets
//! - `message` - Result messages and segment time mapping
//! - `cli` - Command-line front end
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cepstrum::{AudioChunk, AudioInfo, Cepstrum, CepstrumConfig, SampleFormat};
//!
//! let engine = Cepstrum::new(CepstrumConfig::default())?;
//! engine.setup(AudioInfo::new(SampleFormat::S16, 16000, 1))?;
//!
//! let report = engine.process(AudioChunk::new(&pcm).with_timestamp(0))?;
//! for msg in &report.messages {
//!     println!("{:?}", msg.magnitude);
//! }
//! ```
//!
//! ## Presets
//!
//! | Preset | Rate     | Frame | Coefficients | Interval |
//! |--------|----------|-------|--------------|----------|
//! | speech | 16 kHz   | 1022  | 13           | 100 ms   |
//! | music  | 44.1 kHz | 2048  | 20           | 50 ms    |

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration and presets
pub mod config;

pub mod error;

// Result messages
pub mod message;

pub use config::{CepstrumConfig, Preset};
pub use core::{
    AudioChunk, AudioInfo, Cepstrum, ChannelMode, Endianness, EngineStatus, ProcessReport,
    SampleFormat,
};
pub use error::{ConfigError, EngineError, FormatError};
pub use message::{CepstrumMessage, Magnitude, Segment};
