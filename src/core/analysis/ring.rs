// src/core/analysis/ring.rs
//
// Circular sample store holding the most recent analysis frame of one channel.

use crate::core::decoder::SampleDecoder;

/// Fixed-length circular buffer of decoded samples.
///
/// The write cursor always points at the oldest sample, so reading from the
/// cursor onwards yields the frame in chronological order.
#[derive(Debug, Clone)]
pub struct FrameRingBuffer {
    samples: Vec<f32>,
    cursor: usize,
}

impl FrameRingBuffer {
    pub fn new(frame_length: usize) -> Self {
        Self {
            samples: vec![0.0; frame_length],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current write position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw storage in ring order (not chronological)
    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Decode `frames` sample-frames of `channel` at the cursor and advance it.
    pub fn write(&mut self, decoder: &SampleDecoder, input: &[u8], channel: usize, frames: usize) {
        self.cursor = decoder.decode(input, channel, frames, &mut self.samples, self.cursor);
    }

    /// Append already decoded samples.
    #[cfg(test)]
    pub(crate) fn push(&mut self, samples: &[f32]) {
        let len = self.samples.len();
        for &s in samples {
            self.samples[self.cursor] = s;
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Copy the oldest `dest.len()` samples into `dest`, oldest first.
    pub fn copy_chronological(&self, dest: &mut [f32]) {
        let (newer, older) = self.samples.split_at(self.cursor);
        for (d, &s) in dest.iter_mut().zip(older.iter().chain(newer)) {
            *d = s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chronological_order_after_wrap() {
        let mut ring = FrameRingBuffer::new(4);
        ring.push(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(ring.cursor(), 2);
        assert_eq!(ring.as_slice(), &[5.0, 6.0, 3.0, 4.0]);

        let mut frame = vec![0.0f32; 4];
        ring.copy_chronological(&mut frame);
        assert_eq!(frame, vec![3.0, 4.0, 5.0, 6.0]);

        let mut oldest = vec![0.0f32; 3];
        ring.copy_chronological(&mut oldest);
        assert_eq!(oldest, vec![3.0, 4.0, 5.0]);
    }
}
