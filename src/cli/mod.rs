// src/cli/mod.rs
//
// Command-line front end: reads PCM, feeds it to the engine in chunks and
// prints every result.

mod args;
mod input;
mod output;

pub use args::Args;
pub use input::{collect_input_files, read_raw, read_wav, PcmInput};
pub use output::{format_coefficients, format_time, print_json, print_message};

use anyhow::{Context, Result};
use colorful::Colorful;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::Path;

use crate::config::{CepstrumConfig, MAX_SAMPLE_RATE, SECOND_NS};
use crate::core::{scale_u64, AudioChunk, Cepstrum};
use crate::message::CepstrumMessage;

/// Run the CLI
pub fn run(args: &Args) -> Result<()> {
    if args.list_presets {
        output::print_presets();
        return Ok(());
    }

    let input = args.input.as_deref().context("No input given")?;
    let config = args.analysis_config()?;
    let files = collect_input_files(input, args.raw)?;

    if files.is_empty() {
        println!("{}", "No audio files found!".red());
        return Ok(());
    }

    if !args.json {
        println!("Found {} audio file(s)\n", files.len());
    }

    for file_path in files {
        process_file(&file_path, args, &config)?;
    }

    Ok(())
}

fn process_file(file_path: &Path, args: &Args, config: &CepstrumConfig) -> Result<()> {
    let pcm = if args.raw {
        read_raw(file_path, args.raw_info()?)?
    } else {
        read_wav(file_path)?
    };

    let mut config = config.clone();
    if args.sample_rate.is_none() && pcm.info.rate <= MAX_SAMPLE_RATE {
        config.sample_rate = pcm.info.rate;
    }

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        println!("Analyzing: {}", file_path.display().to_string().cyan());
        println!(
            "  {:?}, {} Hz, {} channel(s), {:.2}s",
            pcm.info.format,
            pcm.info.rate,
            pcm.info.channels,
            pcm.duration_secs()
        );
        output::print_config(&config);

        let pb = ProgressBar::new(pcm.data.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let mut messages = Vec::new();
    analyze_pcm(&pcm, &config, args.chunk_frames, &progress, |msg| {
        messages.push(msg.clone())
    })
    .with_context(|| format!("Analysis failed for {}", file_path.display()))?;
    progress.finish_and_clear();

    for msg in &messages {
        if args.json {
            print_json(msg)?;
        } else {
            print_message(msg);
        }
    }

    if !args.json {
        output::print_summary(messages.len(), pcm.duration_secs());
        println!();
    }

    Ok(())
}

/// Stream `pcm` through a fresh engine in chunks of `chunk_frames`
/// sample-frames, handing every result to `on_message`.
///
/// Each chunk is stamped with the time of its first sample. Returns the
/// number of results.
pub fn analyze_pcm<F>(
    pcm: &PcmInput,
    config: &CepstrumConfig,
    chunk_frames: usize,
    progress: &ProgressBar,
    mut on_message: F,
) -> Result<usize>
where
    F: FnMut(&CepstrumMessage),
{
    let engine = Cepstrum::new(config.clone())?;
    engine.setup(pcm.info)?;
    engine.start();

    let stride = pcm.info.bytes_per_frame();
    let rate = pcm.info.rate as u64;
    let mut frames_done = 0u64;
    let mut count = 0;

    for chunk in pcm.data.chunks(chunk_frames.max(1) * stride) {
        let timestamp = scale_u64(frames_done, SECOND_NS, rate);
        let report = engine.process(AudioChunk::new(chunk).with_timestamp(timestamp))?;

        if report.bytes_consumed < chunk.len() {
            debug!("dropping {} trailing bytes", chunk.len() - report.bytes_consumed);
        }
        frames_done += (report.bytes_consumed / stride) as u64;

        for msg in &report.messages {
            on_message(msg);
            count += 1;
        }
        progress.inc(chunk.len() as u64);
    }

    engine.stop();
    info!("{} frames analysed, {} results", frames_done, count);
    Ok(count)
}
