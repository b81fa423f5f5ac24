// tests/test_utils/mod.rs
//
// Synthetic signal generators and PCM byte encoders shared by the
// integration tests.

#![allow(dead_code)]

use std::f32::consts::PI;

use cepstrum::{Endianness, SampleFormat};

/// Mono sine at `amplitude` (0.0-1.0)
pub fn sine(freq: f32, rate: u32, num_frames: usize, amplitude: f32) -> Vec<f32> {
    (0..num_frames)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / rate as f32).sin())
        .collect()
}

pub fn silence(num_frames: usize) -> Vec<f32> {
    vec![0.0; num_frames]
}

/// Deterministic pseudo-random noise in [-amplitude, amplitude]
pub fn noise(num_frames: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..num_frames)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            amplitude * (state as f32 / u32::MAX as f32 * 2.0 - 1.0)
        })
        .collect()
}

/// Interleave equally long channels into one sample stream
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let num_frames = channels.first().map(Vec::len).unwrap_or(0);
    let mut out = Vec::with_capacity(num_frames * channels.len());
    for i in 0..num_frames {
        for channel in channels {
            out.push(channel[i]);
        }
    }
    out
}

/// Encode normalized samples into PCM bytes of the given format.
pub fn encode(samples: &[f32], format: SampleFormat, endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * format.bytes_per_sample());
    for &s in samples {
        let s = s.clamp(-1.0, 1.0);
        match format {
            SampleFormat::S16 => {
                let v = (s * i16::MAX as f32).round() as i16;
                push_bytes(&mut out, &v.to_le_bytes(), &v.to_be_bytes(), endianness);
            }
            SampleFormat::S24 => {
                let v = (s * 8_388_607.0).round() as i32;
                let le = v.to_le_bytes();
                let be = v.to_be_bytes();
                push_bytes(&mut out, &le[..3], &be[1..], endianness);
            }
            SampleFormat::S32 => {
                let v = (s as f64 * i32::MAX as f64).round() as i32;
                push_bytes(&mut out, &v.to_le_bytes(), &v.to_be_bytes(), endianness);
            }
            SampleFormat::F32 => {
                push_bytes(&mut out, &s.to_le_bytes(), &s.to_be_bytes(), endianness);
            }
            SampleFormat::F64 => {
                let v = s as f64;
                push_bytes(&mut out, &v.to_le_bytes(), &v.to_be_bytes(), endianness);
            }
        }
    }
    out
}

fn push_bytes(out: &mut Vec<u8>, le: &[u8], be: &[u8], endianness: Endianness) {
    match endianness {
        Endianness::Little => out.extend_from_slice(le),
        Endianness::Big => out.extend_from_slice(be),
    }
}

/// 16-bit little-endian PCM
pub fn s16_bytes(samples: &[f32]) -> Vec<u8> {
    encode(samples, SampleFormat::S16, Endianness::Little)
}

/// 32-bit float little-endian PCM
pub fn f32_bytes(samples: &[f32]) -> Vec<u8> {
    encode(samples, SampleFormat::F32, Endianness::Little)
}

pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
