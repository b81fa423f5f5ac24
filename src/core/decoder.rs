// src/core/decoder.rs
//
// Raw PCM sample decoding into the analysis ring buffers.
// Formats follow the interleaved layouts produced by common audio
// pipelines: S16, S24 (packed), S32, F32 and F64 in either byte order.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Sample encoding of the incoming stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    S16,
    /// Packed 3-byte signed integer
    S24,
    S32,
    F32,
    F64,
}

impl SampleFormat {
    pub fn all() -> Vec<Self> {
        vec![Self::S16, Self::S24, Self::S32, Self::F32, Self::F64]
    }

    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::S16 => 2,
            Self::S24 => 3,
            Self::S32 => 4,
            Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Divisor mapping the format onto nominal [-1.0, 1.0].
    ///
    /// Integer formats use their largest positive value, floats pass through.
    pub fn max_value(&self) -> f32 {
        if self.is_float() {
            1.0
        } else {
            let bits = self.bytes_per_sample() * 8;
            ((1u64 << (bits - 1)) - 1) as f32
        }
    }

    /// Parse a format name such as `S16LE`, `s24be` or `F32`.
    ///
    /// A missing byte-order suffix selects the host byte order.
    pub fn from_name(name: &str) -> Result<(Self, Endianness), FormatError> {
        let upper = name.trim().to_uppercase();
        let (base, endianness) = if let Some(base) = upper.strip_suffix("LE") {
            (base, Endianness::Little)
        } else if let Some(base) = upper.strip_suffix("BE") {
            (base, Endianness::Big)
        } else {
            (upper.as_str(), Endianness::native())
        };

        let format = match base {
            "S16" => Self::S16,
            "S24" => Self::S24,
            "S32" => Self::S32,
            "F32" => Self::F32,
            "F64" => Self::F64,
            _ => return Err(FormatError::UnsupportedFormat(name.to_string())),
        };
        Ok((format, endianness))
    }
}

/// Byte order of multi-byte samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Self::native()
    }
}

/// Stream descriptor negotiated before processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInfo {
    pub format: SampleFormat,
    pub endianness: Endianness,
    /// Sample rate in Hz
    pub rate: u32,
    /// Number of interleaved channels
    pub channels: usize,
}

impl AudioInfo {
    /// Descriptor in host byte order
    pub fn new(format: SampleFormat, rate: u32, channels: usize) -> Self {
        Self {
            format,
            endianness: Endianness::native(),
            rate,
            channels,
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Bytes per sample-frame (one sample for every channel)
    pub fn bytes_per_frame(&self) -> usize {
        self.format.bytes_per_sample() * self.channels
    }

    pub fn validate(&self) -> Result<(), FormatError> {
        if self.channels == 0 {
            return Err(FormatError::NoChannels);
        }
        if self.rate == 0 {
            return Err(FormatError::ZeroRate);
        }
        Ok(())
    }
}

/// How interleaved channels map onto analysis channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    /// Average all channels into one analysis channel
    Mixed,
    /// Analyse every channel separately
    PerChannel,
}

type SampleReader = fn(&[u8]) -> f32;

/// Decoder for one (format, byte order, channel mode) combination.
///
/// The per-sample reader is picked once on construction, so the hot loop
/// never branches on the format.
#[derive(Debug, Clone)]
pub struct SampleDecoder {
    read: SampleReader,
    scale: f32,
    bytes_per_sample: usize,
    channels: usize,
    mode: ChannelMode,
}

impl SampleDecoder {
    pub fn new(info: &AudioInfo, mode: ChannelMode) -> Self {
        let read: SampleReader = match (info.format, info.endianness) {
            (SampleFormat::S16, Endianness::Little) => read_s16_le,
            (SampleFormat::S16, Endianness::Big) => read_s16_be,
            (SampleFormat::S24, Endianness::Little) => read_s24_le,
            (SampleFormat::S24, Endianness::Big) => read_s24_be,
            (SampleFormat::S32, Endianness::Little) => read_s32_le,
            (SampleFormat::S32, Endianness::Big) => read_s32_be,
            (SampleFormat::F32, Endianness::Little) => read_f32_le,
            (SampleFormat::F32, Endianness::Big) => read_f32_be,
            (SampleFormat::F64, Endianness::Little) => read_f64_le,
            (SampleFormat::F64, Endianness::Big) => read_f64_be,
        };

        Self {
            read,
            scale: info.format.max_value(),
            bytes_per_sample: info.format.bytes_per_sample(),
            channels: info.channels,
            mode,
        }
    }

    /// Number of analysis channels this decoder feeds
    pub fn output_channels(&self) -> usize {
        match self.mode {
            ChannelMode::Mixed => 1,
            ChannelMode::PerChannel => self.channels,
        }
    }

    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample * self.channels
    }

    /// Decode up to `frames` sample-frames from `input` into `out`.
    ///
    /// Writing starts at `pos` and wraps modulo `out.len()`. `channel` selects
    /// the source channel in per-channel mode and is ignored when mixing.
    /// Returns the position following the last written sample.
    pub fn decode(
        &self,
        input: &[u8],
        channel: usize,
        frames: usize,
        out: &mut [f32],
        mut pos: usize,
    ) -> usize {
        let len = out.len();
        let stride = self.bytes_per_frame();
        let bps = self.bytes_per_sample;

        match self.mode {
            ChannelMode::Mixed => {
                for frame in input.chunks_exact(stride).take(frames) {
                    let mut v = 0.0f32;
                    for sample in frame.chunks_exact(bps) {
                        v += (self.read)(sample) / self.scale;
                    }
                    out[pos] = v / self.channels as f32;
                    pos = (pos + 1) % len;
                }
            }
            ChannelMode::PerChannel => {
                let offset = channel * bps;
                for frame in input.chunks_exact(stride).take(frames) {
                    out[pos] = (self.read)(&frame[offset..offset + bps]) / self.scale;
                    pos = (pos + 1) % len;
                }
            }
        }

        pos
    }
}

fn read_s16_le(b: &[u8]) -> f32 {
    i16::from_le_bytes([b[0], b[1]]) as f32
}

fn read_s16_be(b: &[u8]) -> f32 {
    i16::from_be_bytes([b[0], b[1]]) as f32
}

fn read_s24_le(b: &[u8]) -> f32 {
    sign_extend_24(b[0] as i32 | (b[1] as i32) << 8 | (b[2] as i32) << 16) as f32
}

fn read_s24_be(b: &[u8]) -> f32 {
    sign_extend_24((b[0] as i32) << 16 | (b[1] as i32) << 8 | b[2] as i32) as f32
}

/// Propagate bit 23 into the upper byte
fn sign_extend_24(v: i32) -> i32 {
    (v << 8) >> 8
}

fn read_s32_le(b: &[u8]) -> f32 {
    i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f32
}

fn read_s32_be(b: &[u8]) -> f32 {
    i32::from_be_bytes([b[0], b[1], b[2], b[3]]) as f32
}

fn read_f32_le(b: &[u8]) -> f32 {
    f32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn read_f32_be(b: &[u8]) -> f32 {
    f32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn read_f64_le(b: &[u8]) -> f32 {
    f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32
}

fn read_f64_be(b: &[u8]) -> f32 {
    f64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32
}
