//! CLI arguments with preset and override support

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::config::{CepstrumConfig, Preset};
use crate::core::decoder::{AudioInfo, SampleFormat};

#[derive(Parser, Debug, Clone)]
#[command(name = "cepstrum")]
#[command(about = "Compute streaming MFCCs from WAV or raw PCM audio")]
pub struct Args {
    /// Input file or directory
    #[arg(short, long, required_unless_present = "list_presets")]
    pub input: Option<PathBuf>,

    /// Treat inputs as headerless PCM (see --format, --channels, --rate)
    #[arg(long)]
    pub raw: bool,

    /// Raw sample format: S16, S24, S32, F32, F64 with optional LE/BE suffix
    #[arg(long, default_value = "S16LE")]
    pub format: String,

    /// Raw channel count
    #[arg(long, default_value_t = 1)]
    pub channels: usize,

    /// Raw sample rate in Hz
    #[arg(long, default_value_t = 16000)]
    pub rate: u32,

    /// Preset to start from (speech, music)
    #[arg(short, long, default_value = "speech", env = "CEPSTRUM_PRESET")]
    pub preset: String,

    /// JSON configuration file, replaces the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Filterbank sample rate; follows the stream rate when omitted
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Number of one-sided FFT bins
    #[arg(long)]
    pub fft_size: Option<usize>,

    /// Hamming window length
    #[arg(long)]
    pub window_size: Option<usize>,

    #[arg(long)]
    pub hop_size: Option<usize>,

    /// Cepstral coefficients per result
    #[arg(short = 'n', long)]
    pub num_coeffs: Option<usize>,

    /// Result interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    #[arg(long)]
    pub no_preemphasis: bool,

    #[arg(long)]
    pub preemphasis_coeff: Option<f32>,

    /// One coefficient vector per channel instead of a mono mix
    #[arg(short, long)]
    pub multi_channel: bool,

    /// Sample-frames fed to the analyzer per chunk
    #[arg(long, default_value_t = 1024)]
    pub chunk_frames: usize,

    /// Print results as JSON lines
    #[arg(long)]
    pub json: bool,

    /// List available presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve preset or config file, then apply individual overrides.
    pub fn analysis_config(&self) -> Result<CepstrumConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => CepstrumConfig::from_preset(Preset::from_name(&self.preset)?),
        };

        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(size) = self.fft_size {
            config.fft_size = size;
        }
        if let Some(size) = self.window_size {
            config.window_size = size;
        }
        if let Some(size) = self.hop_size {
            config.hop_size = size;
        }
        if let Some(n) = self.num_coeffs {
            config.num_coeffs = n;
        }
        if let Some(ms) = self.interval_ms {
            config.interval_ns = ms.saturating_mul(1_000_000);
        }
        if self.no_preemphasis {
            config.use_preemphasis = false;
        }
        if let Some(coeff) = self.preemphasis_coeff {
            config.preemphasis_coeff = coeff;
        }
        if self.multi_channel {
            config.multi_channel = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Stream descriptor for `--raw` inputs
    pub fn raw_info(&self) -> Result<AudioInfo> {
        let (format, endianness) = SampleFormat::from_name(&self.format)?;
        let info = AudioInfo::new(format, self.rate, self.channels).with_endianness(endianness);
        info.validate()?;
        Ok(info)
    }
}
