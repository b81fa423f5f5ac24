// src/cli/input.rs
//
// Loading PCM from WAV containers and headerless files.

use anyhow::{bail, Context, Result};
use hound::WavReader;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::decoder::{AudioInfo, Endianness, SampleFormat};

/// Interleaved PCM bytes together with their descriptor
#[derive(Debug, Clone)]
pub struct PcmInput {
    pub info: AudioInfo,
    pub data: Vec<u8>,
}

impl PcmInput {
    pub fn num_frames(&self) -> usize {
        self.data.len() / self.info.bytes_per_frame()
    }

    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / self.info.rate as f64
    }
}

/// Unpack a WAV file into little-endian PCM bytes.
pub fn read_wav(path: &Path) -> Result<PcmInput> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();

    let (format, data) = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => (
            SampleFormat::S16,
            collect_bytes(&mut reader, 2, |s: i16, out| out.extend_from_slice(&s.to_le_bytes()))?,
        ),
        (hound::SampleFormat::Int, 24) => (
            SampleFormat::S24,
            collect_bytes(&mut reader, 3, |s: i32, out| out.extend_from_slice(&s.to_le_bytes()[..3]))?,
        ),
        (hound::SampleFormat::Int, 32) => (
            SampleFormat::S32,
            collect_bytes(&mut reader, 4, |s: i32, out| out.extend_from_slice(&s.to_le_bytes()))?,
        ),
        (hound::SampleFormat::Float, 32) => (
            SampleFormat::F32,
            collect_bytes(&mut reader, 4, |s: f32, out| out.extend_from_slice(&s.to_le_bytes()))?,
        ),
        (sample_format, bits) => {
            bail!("Unsupported WAV format: {:?} {} bit", sample_format, bits)
        }
    };

    let info = AudioInfo::new(format, spec.sample_rate, spec.channels as usize)
        .with_endianness(Endianness::Little);
    info.validate()?;

    Ok(PcmInput { info, data })
}

fn collect_bytes<R, S, F>(reader: &mut WavReader<R>, width: usize, encode: F) -> Result<Vec<u8>>
where
    R: Read,
    S: hound::Sample,
    F: Fn(S, &mut Vec<u8>),
{
    let mut data = Vec::with_capacity(reader.len() as usize * width);
    for sample in reader.samples::<S>() {
        encode(sample?, &mut data);
    }
    Ok(data)
}

/// Read a headerless PCM file described by `info`.
pub fn read_raw(path: &Path, info: AudioInfo) -> Result<PcmInput> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(PcmInput { info, data })
}

/// Collect input files. A file path is taken as is; directories are
/// searched for `.wav` (or `.raw`/`.pcm` in raw mode) files.
pub fn collect_input_files(path: &Path, raw: bool) -> Result<Vec<PathBuf>> {
    let extensions: &[&str] = if raw { &["raw", "pcm"] } else { &["wav"] };
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if let Some(ext) = path.extension() {
                if extensions.contains(&ext.to_str().unwrap_or("").to_lowercase().as_str()) {
                    files.push(path.to_path_buf());
                }
            }
        }
    } else {
        bail!("Input not found: {}", path.display());
    }

    Ok(files)
}
