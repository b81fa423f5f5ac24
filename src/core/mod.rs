//! Core streaming analysis

pub mod analysis;
pub mod decoder;
pub mod dsp;
pub mod engine;
pub mod scheduler;

pub use decoder::{AudioInfo, ChannelMode, Endianness, SampleDecoder, SampleFormat};
pub use engine::{AudioChunk, Cepstrum, EngineStatus, ProcessReport};
pub use scheduler::{scale_u64, IntervalScheduler, IntervalSummary};
