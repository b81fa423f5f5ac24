// src/core/scheduler.rs
//
// Interval accounting with integer nanosecond arithmetic.
// Interval lengths are whole sample-frames; the fractional remainder of
// every interval is carried and paid back as single extra frames, so the
// long-run interval length matches the configured one without drift.

use crate::config::SECOND_NS;

/// `val * num / denom` with a 128-bit intermediate, saturating at `u64::MAX`.
pub fn scale_u64(val: u64, num: u64, denom: u64) -> u64 {
    let scaled = val as u128 * num as u128 / denom as u128;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Summary of a finished interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSummary {
    /// Sample-frames that made up the interval
    pub frames: u64,
    /// Spectral evaluations that contributed to it
    pub num_fft: u64,
}

/// Decides block sizes, FFT triggers and interval boundaries
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    frames_per_interval: u64,
    error_per_interval: u64,
    accumulated_error: u64,
    frames_todo: u64,
    num_frames: u64,
    num_fft: u64,
}

impl IntervalScheduler {
    pub fn new(interval_ns: u64, rate: u32) -> Self {
        let product = interval_ns as u128 * rate as u128;
        let mut frames_per_interval = scale_u64(interval_ns, rate as u64, SECOND_NS);
        let mut error_per_interval = (product % SECOND_NS as u128) as u64;

        if frames_per_interval == 0 {
            // shorter than one frame: emit every frame, nothing left to carry
            frames_per_interval = 1;
            error_per_interval = 0;
        }

        Self {
            frames_per_interval,
            error_per_interval,
            accumulated_error: 0,
            frames_todo: frames_per_interval,
            num_frames: 0,
            num_fft: 0,
        }
    }

    /// Restart the current interval from zero, keeping the derived rates.
    pub fn flush(&mut self) {
        self.num_frames = 0;
        self.num_fft = 0;
        self.accumulated_error = 0;
        self.frames_todo = self.frames_per_interval;
    }

    /// Frames to consume next: never past the end of the current FFT frame,
    /// the current interval, or the available input.
    pub fn block_size(&self, frame_length: usize, available: u64) -> u64 {
        let frame_length = frame_length as u64;
        let fft_todo = frame_length - self.num_frames % frame_length;
        let msg_todo = self.frames_todo.saturating_sub(self.num_frames);
        msg_todo.min(available).min(fft_todo)
    }

    pub fn advance(&mut self, frames: u64) {
        self.num_frames += frames;
    }

    pub fn interval_complete(&self) -> bool {
        self.num_frames == self.frames_todo
    }

    /// A full frame just accumulated, or the interval ends without any
    /// spectral estimate yet.
    pub fn needs_fft(&self, frame_length: usize) -> bool {
        self.num_frames % frame_length as u64 == 0
            || (self.interval_complete() && self.num_fft == 0)
    }

    pub fn record_fft(&mut self) {
        self.num_fft += 1;
    }

    /// Close the current interval and size the next one.
    pub fn finish_interval(&mut self) -> IntervalSummary {
        let summary = IntervalSummary {
            frames: self.num_frames,
            num_fft: self.num_fft,
        };

        self.frames_todo = self.frames_per_interval;
        // add before testing: testing first lets the total fall two frames behind
        self.accumulated_error += self.error_per_interval;
        if self.accumulated_error >= SECOND_NS {
            self.accumulated_error -= SECOND_NS;
            self.frames_todo += 1;
        }

        self.num_frames = 0;
        self.num_fft = 0;
        summary
    }

    pub fn frames_per_interval(&self) -> u64 {
        self.frames_per_interval
    }

    pub fn error_per_interval(&self) -> u64 {
        self.error_per_interval
    }

    pub fn accumulated_error(&self) -> u64 {
        self.accumulated_error
    }

    pub fn frames_todo(&self) -> u64 {
        self.frames_todo
    }

    pub fn num_frames(&self) -> u64 {
        self.num_frames
    }

    pub fn num_fft(&self) -> u64 {
        self.num_fft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `n` complete intervals and return the total frame count
    fn run_intervals(scheduler: &mut IntervalScheduler, n: u64) -> u64 {
        let mut total = 0;
        for _ in 0..n {
            let frames = scheduler.frames_todo();
            scheduler.advance(frames);
            assert!(scheduler.interval_complete());
            total += scheduler.finish_interval().frames;
        }
        total
    }

    #[test]
    fn test_exact_interval() {
        let mut scheduler = IntervalScheduler::new(SECOND_NS / 10, 16000);
        assert_eq!(scheduler.frames_per_interval(), 1600);
        assert_eq!(scheduler.error_per_interval(), 0);
        assert_eq!(run_intervals(&mut scheduler, 50), 80_000);
    }

    #[test]
    fn test_no_drift() {
        let cases: [(u64, u32); 7] = [
            (SECOND_NS / 3, 44_100),
            (7_000_000, 44_100),
            (123_456_789, 22_050),
            (1_000_000_007, 8_000),
            (10_000_000, 11_025),
            (999_999_999, 92_000),
            // remainder of 0.999 s per interval
            (999_999_999, 1_000),
        ];

        for (interval_ns, rate) in cases {
            let mut scheduler = IntervalScheduler::new(interval_ns, rate);
            let mut total = 0;
            for n in 1..=500u64 {
                total += run_intervals(&mut scheduler, 1);
                let exact = scale_u64(n * interval_ns, rate as u64, SECOND_NS);
                assert!(
                    total == exact || total + 1 == exact,
                    "interval {} @ {} Hz: after {} intervals got {} frames, exact {}",
                    interval_ns, rate, n, total, exact
                );
            }
        }
    }

    #[test]
    fn test_tiny_interval_is_clamped() {
        let mut scheduler = IntervalScheduler::new(1, 48_000);
        assert_eq!(scheduler.frames_per_interval(), 1);
        assert_eq!(run_intervals(&mut scheduler, 10), 10);
    }

    #[test]
    fn test_block_size_limits() {
        let mut scheduler = IntervalScheduler::new(SECOND_NS / 10, 16000);
        // fft frame is the tightest limit
        assert_eq!(scheduler.block_size(1022, 5000), 1022);
        // then the input
        assert_eq!(scheduler.block_size(1022, 100), 100);

        scheduler.advance(1022);
        assert!(scheduler.needs_fft(1022));
        scheduler.record_fft();
        // interval boundary at 1600 comes before the next frame end at 2044
        assert_eq!(scheduler.block_size(1022, 5000), 578);
        scheduler.advance(578);
        assert!(scheduler.interval_complete());
        assert!(!scheduler.needs_fft(1022));
    }

    #[test]
    fn test_short_interval_forces_fft() {
        let mut scheduler = IntervalScheduler::new(SECOND_NS / 100, 16000);
        assert_eq!(scheduler.block_size(1022, 5000), 160);
        scheduler.advance(160);
        assert!(scheduler.needs_fft(1022));
    }

    #[test]
    fn test_flush_restarts_interval() {
        let mut scheduler = IntervalScheduler::new(SECOND_NS / 3, 44_100);
        run_intervals(&mut scheduler, 3);
        scheduler.advance(17);
        scheduler.record_fft();

        scheduler.flush();
        assert_eq!(scheduler.num_frames(), 0);
        assert_eq!(scheduler.num_fft(), 0);
        assert_eq!(scheduler.accumulated_error(), 0);
        assert_eq!(scheduler.frames_todo(), scheduler.frames_per_interval());
    }

    #[test]
    fn test_scale_saturates() {
        assert_eq!(scale_u64(3, 5, 2), 7);
        assert_eq!(scale_u64(u64::MAX, 2, 1), u64::MAX);
    }
}
