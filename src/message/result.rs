//! Result types emitted once per completed interval

use serde::{Deserialize, Serialize};

/// Maps buffer timestamps onto stream and running time.
///
/// The default segment starts at zero and maps timestamps one to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Timestamp at which the segment starts (ns)
    pub start: u64,
    /// Stream time corresponding to `start` (ns)
    pub time: u64,
    /// Running time accumulated before this segment (ns)
    pub base: u64,
}

impl Segment {
    /// `None` for timestamps before the segment start
    pub fn to_stream_time(&self, timestamp: u64) -> Option<u64> {
        timestamp.checked_sub(self.start).map(|d| d.saturating_add(self.time))
    }

    /// `None` for timestamps before the segment start
    pub fn to_running_time(&self, timestamp: u64) -> Option<u64> {
        timestamp.checked_sub(self.start).map(|d| d.saturating_add(self.base))
    }
}

/// Coefficient vectors of one interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Magnitude {
    /// Single vector for the down-mixed stream
    Mono(Vec<f32>),
    /// One vector per channel, ordered by channel index
    PerChannel(Vec<Vec<f32>>),
}

impl Magnitude {
    pub fn num_channels(&self) -> usize {
        match self {
            Magnitude::Mono(_) => 1,
            Magnitude::PerChannel(channels) => channels.len(),
        }
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        match self {
            Magnitude::Mono(coeffs) if index == 0 => Some(coeffs),
            Magnitude::Mono(_) => None,
            Magnitude::PerChannel(channels) => channels.get(index).map(Vec::as_slice),
        }
    }
}

/// One `cepstrum` result.
///
/// All times are nanoseconds; `None` marks an unknown time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CepstrumMessage {
    /// Timestamp of the first sample of the interval
    pub timestamp: Option<u64>,
    pub stream_time: Option<u64>,
    pub running_time: Option<u64>,
    /// Configured interval length
    pub duration: u64,
    /// `stream_time + duration`, kept for older consumers
    pub endtime: Option<u64>,
    pub magnitude: Magnitude,
}

impl CepstrumMessage {
    pub const NAME: &'static str = "cepstrum";

    pub fn new(
        timestamp: Option<u64>,
        duration: u64,
        segment: &Segment,
        magnitude: Magnitude,
    ) -> Self {
        let stream_time = timestamp.and_then(|ts| segment.to_stream_time(ts));
        let running_time = timestamp.and_then(|ts| segment.to_running_time(ts));
        Self {
            timestamp,
            stream_time,
            running_time,
            duration,
            endtime: stream_time.map(|st| st.saturating_add(duration)),
            magnitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_times() {
        let segment = Segment {
            start: 1_000,
            time: 50_000,
            base: 7,
        };
        assert_eq!(segment.to_stream_time(1_500), Some(50_500));
        assert_eq!(segment.to_running_time(1_500), Some(507));
        assert_eq!(segment.to_stream_time(999), None);
    }

    #[test]
    fn test_message_times() {
        let msg = CepstrumMessage::new(
            Some(200),
            100,
            &Segment::default(),
            Magnitude::Mono(vec![1.0, 2.0]),
        );
        assert_eq!(msg.stream_time, Some(200));
        assert_eq!(msg.running_time, Some(200));
        assert_eq!(msg.endtime, Some(300));

        let unknown = CepstrumMessage::new(None, 100, &Segment::default(), msg.magnitude.clone());
        assert_eq!(unknown.endtime, None);

        let late = CepstrumMessage::new(Some(u64::MAX - 10), 100, &Segment::default(), msg.magnitude);
        assert_eq!(late.endtime, Some(u64::MAX));
    }

    #[test]
    fn test_json_field_names() {
        let msg = CepstrumMessage::new(
            Some(0),
            100,
            &Segment::default(),
            Magnitude::PerChannel(vec![vec![1.0], vec![2.0]]),
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["stream-time"], 0);
        assert_eq!(json["running-time"], 0);
        assert_eq!(json["magnitude"][1][0], 2.0);
    }

    #[test]
    fn test_magnitude_channels() {
        let mono = Magnitude::Mono(vec![0.5]);
        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.channel(0), Some(&[0.5][..]));
        assert_eq!(mono.channel(1), None);

        let multi = Magnitude::PerChannel(vec![vec![1.0], vec![2.0], vec![3.0]]);
        assert_eq!(multi.num_channels(), 3);
        assert_eq!(multi.channel(2), Some(&[3.0][..]));
    }
}
