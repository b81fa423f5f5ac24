//! Output formatting for CLI results

use anyhow::Result;
use colorful::Colorful;

use crate::config::{CepstrumConfig, Preset};
use crate::message::CepstrumMessage;

/// Seconds with millisecond precision, `--` when unknown
pub fn format_time(ns: Option<u64>) -> String {
    match ns {
        Some(ns) => format!("{:.3}s", ns as f64 / 1e9),
        None => "--".to_string(),
    }
}

pub fn format_coefficients(coeffs: &[f32]) -> String {
    coeffs
        .iter()
        .map(|c| format!("{:8.3}", c))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_config(config: &CepstrumConfig) {
    println!(
        "  {} Hz filterbank, {} bins ({}-sample frames), window {}, {} coefficients every {:.0} ms",
        config.sample_rate,
        config.fft_size,
        config.frame_length(),
        config.window_size,
        config.num_coeffs,
        config.interval_ns as f64 / 1e6
    );
}

pub fn print_message(msg: &CepstrumMessage) {
    let time = format_time(msg.stream_time.or(msg.timestamp));
    let channels = msg.magnitude.num_channels();
    for c in 0..channels {
        let Some(coeffs) = msg.magnitude.channel(c) else {
            continue;
        };
        if channels > 1 {
            println!("  {} ch{} {}", time.clone().cyan(), c, format_coefficients(coeffs));
        } else {
            println!("  {} {}", time.clone().cyan(), format_coefficients(coeffs));
        }
    }
}

/// One JSON object per line
pub fn print_json(msg: &CepstrumMessage) -> Result<()> {
    println!("{}", serde_json::to_string(msg)?);
    Ok(())
}

pub fn print_summary(num_messages: usize, duration_secs: f64) {
    let text = format!("{} results from {:.2}s of audio", num_messages, duration_secs);
    if num_messages == 0 {
        println!("  {}", text.yellow());
    } else {
        println!("  {}", text.green());
    }
}

pub fn print_presets() {
    println!("Available presets:\n");
    for preset in Preset::all() {
        println!("  {:8} {}", preset.name().bold(), preset.description());
    }
}
