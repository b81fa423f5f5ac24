// src/core/engine.rs
//
// Streaming MFCC engine.
//
// All mutable state lives behind one mutex; every public call holds it for
// its whole duration, so configuration changes serialize with chunk
// processing. Processing is synchronous and runs each chunk to completion,
// possibly closing several intervals on the way.

use log::{debug, info, trace, warn};
use parking_lot::Mutex;

use super::analysis::{compute_coefficients, ChannelState, MelFilterbank, SpectralAnalyzer};
use super::decoder::{AudioInfo, ChannelMode, SampleDecoder};
use super::scheduler::{scale_u64, IntervalScheduler};
use crate::config::{CepstrumConfig, SECOND_NS};
use crate::error::{ConfigError, EngineError, FormatError};
use crate::message::{CepstrumMessage, Magnitude, Segment};

/// One span of interleaved PCM bytes
#[derive(Debug, Clone, Copy)]
pub struct AudioChunk<'a> {
    pub data: &'a [u8],
    /// Timestamp of the first sample (ns), if known
    pub timestamp: Option<u64>,
    /// The stream is not contiguous with the previous chunk
    pub discont: bool,
}

impl<'a> AudioChunk<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            timestamp: None,
            discont: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_discont(mut self, discont: bool) -> Self {
        self.discont = discont;
        self
    }
}

/// Outcome of one `process` call
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
    /// Bytes consumed; a trailing partial sample-frame is left to the caller
    pub bytes_consumed: usize,
    /// Results of every interval completed by this chunk
    pub messages: Vec<CepstrumMessage>,
}

/// Snapshot of the interval accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStatus {
    /// Channel buffers and filterbank currently exist
    pub allocated: bool,
    /// How many times channel state has been allocated
    pub allocations: u64,
    pub num_frames: u64,
    pub num_fft: u64,
    pub frames_todo: u64,
    pub frames_per_interval: u64,
    pub accumulated_error: u64,
    /// Ring buffer write position
    pub write_cursor: usize,
}

/// Everything sized from one configuration and stream format
struct AnalysisState {
    decoder: SampleDecoder,
    channels: Vec<ChannelState>,
    analyzer: SpectralAnalyzer,
    filterbank: MelFilterbank,
    scheduler: IntervalScheduler,
}

impl AnalysisState {
    fn new(config: &CepstrumConfig, info: &AudioInfo) -> Self {
        let mode = if config.multi_channel {
            ChannelMode::PerChannel
        } else {
            ChannelMode::Mixed
        };
        let decoder = SampleDecoder::new(info, mode);
        let channels = (0..decoder.output_channels())
            .map(|_| ChannelState::new(config))
            .collect();

        Self {
            decoder,
            channels,
            analyzer: SpectralAnalyzer::new(config),
            filterbank: MelFilterbank::from_config(config),
            scheduler: IntervalScheduler::new(config.interval_ns, info.rate),
        }
    }

    fn flush(&mut self) {
        self.scheduler.flush();
        for channel in &mut self.channels {
            channel.reset_interval();
        }
    }
}

struct EngineState {
    config: CepstrumConfig,
    info: Option<AudioInfo>,
    analysis: Option<AnalysisState>,
    segment: Segment,
    /// Timestamp of the next message
    message_ts: Option<u64>,
    allocations: u64,
}

impl EngineState {
    fn reset(&mut self) {
        debug!("resetting state");
        if let Some(analysis) = self.analysis.take() {
            debug!("freeing data for {} channels", analysis.channels.len());
        }
        self.message_ts = None;
    }
}

/// Streaming MFCC analyzer.
///
/// ```rust,ignore
/// let engine = Cepstrum::new(CepstrumConfig::default())?;
/// engine.setup(AudioInfo::new(SampleFormat::S16, 16000, 1))?;
/// let report = engine.process(AudioChunk::new(&bytes).with_timestamp(0))?;
/// for msg in report.messages {
///     println!("{:?}", msg.magnitude);
/// }
/// ```
pub struct Cepstrum {
    state: Mutex<EngineState>,
}

impl Cepstrum {
    pub fn new(config: CepstrumConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CepstrumConfig) -> Self {
        Self {
            state: Mutex::new(EngineState {
                config,
                info: None,
                analysis: None,
                segment: Segment::default(),
                message_ts: None,
                allocations: 0,
            }),
        }
    }

    pub fn config(&self) -> CepstrumConfig {
        self.state.lock().config.clone()
    }

    /// Replace the configuration.
    ///
    /// Invalid values are rejected and leave the current configuration in
    /// place. Changes to the buffer layout drop all channel state, which is
    /// rebuilt on the next chunk.
    pub fn set_config(&self, config: CepstrumConfig) -> Result<(), ConfigError> {
        self.update_config(|c| *c = config)
    }

    /// Modify the configuration in place, e.g. `engine.update_config(|c| c.num_coeffs = 20)`.
    pub fn update_config<F>(&self, update: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut CepstrumConfig),
    {
        let mut state = self.state.lock();
        let mut config = state.config.clone();
        update(&mut config);
        config.validate()?;

        if state.config.requires_reset(&config) {
            state.reset();
        }
        state.config = config;
        Ok(())
    }

    /// Negotiate the stream format. Always drops existing channel state.
    pub fn setup(&self, info: AudioInfo) -> Result<(), FormatError> {
        info.validate()?;
        let mut state = self.state.lock();
        if info.rate != state.config.sample_rate {
            warn!(
                "stream rate {} Hz differs from configured sample rate {} Hz; \
                 the filterbank uses the configured rate",
                info.rate, state.config.sample_rate
            );
        }
        state.info = Some(info);
        state.reset();
        Ok(())
    }

    pub fn info(&self) -> Option<AudioInfo> {
        self.state.lock().info
    }

    pub fn start(&self) {
        self.state.lock().reset();
    }

    pub fn stop(&self) {
        self.state.lock().reset();
    }

    pub fn set_segment(&self, segment: Segment) {
        self.state.lock().segment = segment;
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.state.lock();
        let mut status = EngineStatus {
            allocations: state.allocations,
            ..Default::default()
        };
        if let Some(analysis) = &state.analysis {
            let scheduler = &analysis.scheduler;
            status.allocated = true;
            status.num_frames = scheduler.num_frames();
            status.num_fft = scheduler.num_fft();
            status.frames_todo = scheduler.frames_todo();
            status.frames_per_interval = scheduler.frames_per_interval();
            status.accumulated_error = scheduler.accumulated_error();
            status.write_cursor = analysis
                .channels
                .first()
                .map(|c| c.ring().cursor())
                .unwrap_or(0);
        }
        status
    }

    /// Copy of a channel's power accumulator for the interval in progress
    pub fn power_spectrum(&self, channel: usize) -> Option<Vec<f32>> {
        let state = self.state.lock();
        state
            .analysis
            .as_ref()
            .and_then(|a| a.channels.get(channel))
            .map(|c| c.power_spectrum().to_vec())
    }

    /// Feed one chunk through the analysis.
    ///
    /// Only whole sample-frames are consumed; see
    /// [`ProcessReport::bytes_consumed`].
    pub fn process(&self, chunk: AudioChunk<'_>) -> Result<ProcessReport, EngineError> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let info = state.info.ok_or(EngineError::NotNegotiated)?;
        let stride = info.bytes_per_frame();

        trace!("input size: {} bytes", chunk.data.len());

        if chunk.discont {
            debug!("Discontinuity detected -- flushing");
            if let Some(analysis) = state.analysis.as_mut() {
                analysis.flush();
            }
        }

        let config = &state.config;
        if state.analysis.is_none() {
            let analysis = AnalysisState::new(config, &info);
            debug!(
                "allocated {} channels: {} bins, {} filters, {} coefficients",
                analysis.channels.len(),
                config.fft_size,
                config.num_filters(),
                config.num_coeffs
            );
            info!(
                "interval {} ns, fpi {}, error {} ns",
                config.interval_ns,
                analysis.scheduler.frames_per_interval(),
                analysis.scheduler.error_per_interval()
            );
            state.analysis = Some(analysis);
            state.allocations += 1;
        }
        let Some(analysis) = state.analysis.as_mut() else {
            return Err(EngineError::NotNegotiated);
        };

        if analysis.scheduler.num_frames() == 0 {
            state.message_ts = chunk.timestamp;
        }

        let frame_length = analysis.analyzer.frame_length();
        let preemphasis = config.use_preemphasis.then_some(config.preemphasis_coeff);
        let mut data = chunk.data;
        let mut report = ProcessReport::default();

        while data.len() >= stride {
            let available = (data.len() / stride) as u64;
            let block = analysis.scheduler.block_size(frame_length, available) as usize;
            trace!(
                "message frames todo: {}, input frames {}, block {}",
                analysis.scheduler.frames_todo() - analysis.scheduler.num_frames(),
                available,
                block
            );

            for (c, channel) in analysis.channels.iter_mut().enumerate() {
                channel.ring.write(&analysis.decoder, data, c, block);
            }
            data = &data[block * stride..];
            report.bytes_consumed += block * stride;
            analysis.scheduler.advance(block as u64);

            let have_full_interval = analysis.scheduler.interval_complete();

            if analysis.scheduler.needs_fft(frame_length) {
                for channel in analysis.channels.iter_mut() {
                    analysis.analyzer.analyze(channel, preemphasis)?;
                }
                analysis.scheduler.record_fft();
            }

            if have_full_interval {
                let summary = analysis.scheduler.finish_interval();
                debug!(
                    "interval done: frames {} ffts {} fpi {} error {} ns",
                    summary.frames,
                    summary.num_fft,
                    analysis.scheduler.frames_per_interval(),
                    analysis.scheduler.accumulated_error()
                );

                if config.post_messages {
                    let mut coeffs: Vec<Vec<f32>> = analysis
                        .channels
                        .iter_mut()
                        .map(|c| compute_coefficients(c, summary.num_fft, &analysis.filterbank).to_vec())
                        .collect();
                    let magnitude = if config.multi_channel {
                        Magnitude::PerChannel(coeffs)
                    } else {
                        Magnitude::Mono(coeffs.pop().unwrap_or_default())
                    };
                    report.messages.push(CepstrumMessage::new(
                        state.message_ts,
                        config.interval_ns,
                        &state.segment,
                        magnitude,
                    ));
                }

                if let Some(ts) = state.message_ts.as_mut() {
                    *ts = ts.saturating_add(scale_u64(summary.frames, SECOND_NS, info.rate as u64));
                }

                for channel in analysis.channels.iter_mut() {
                    channel.reset_interval();
                }
            }
        }

        if !data.is_empty() {
            trace!("{} trailing bytes left for the next chunk", data.len());
        }

        Ok(report)
    }
}

impl Default for Cepstrum {
    fn default() -> Self {
        Self::with_valid_config(CepstrumConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decoder::SampleFormat;

    fn mono_s16() -> AudioInfo {
        AudioInfo::new(SampleFormat::S16, 16000, 1)
    }

    #[test]
    fn test_process_before_setup() {
        let engine = Cepstrum::default();
        let result = engine.process(AudioChunk::new(&[0u8; 4]));
        assert!(matches!(result, Err(EngineError::NotNegotiated)));
    }

    #[test]
    fn test_partial_frame_not_consumed() {
        let engine = Cepstrum::default();
        engine
            .setup(AudioInfo::new(SampleFormat::S16, 16000, 2))
            .unwrap();

        let report = engine.process(AudioChunk::new(&[0u8; 3])).unwrap();
        assert_eq!(report.bytes_consumed, 0);

        let report = engine.process(AudioChunk::new(&[0u8; 10])).unwrap();
        assert_eq!(report.bytes_consumed, 8);
        assert_eq!(engine.status().num_frames, 2);
    }

    #[test]
    fn test_invalid_config_keeps_previous() {
        let engine = Cepstrum::default();
        let err = engine.update_config(|c| c.num_coeffs = 0);
        assert!(err.is_err());
        assert_eq!(engine.config().num_coeffs, 13);
    }

    #[test]
    fn test_soft_changes_keep_state() {
        let engine = Cepstrum::default();
        engine.setup(mono_s16()).unwrap();
        engine.process(AudioChunk::new(&[0u8; 200])).unwrap();
        assert!(engine.status().allocated);

        engine
            .update_config(|c| {
                c.use_preemphasis = false;
                c.preemphasis_coeff = 0.5;
                c.post_messages = false;
            })
            .unwrap();
        let status = engine.status();
        assert!(status.allocated);
        assert_eq!(status.num_frames, 100);

        engine.update_config(|c| c.hop_size = 128).unwrap();
        assert!(!engine.status().allocated);
    }

    #[test]
    fn test_zero_channel_setup_rejected() {
        let engine = Cepstrum::default();
        let err = engine.setup(AudioInfo::new(SampleFormat::F32, 16000, 0));
        assert_eq!(err, Err(FormatError::NoChannels));
        assert!(engine.info().is_none());
    }
}
