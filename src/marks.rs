//! Speech mark storage.
//!
//! The synthesis service returns one timing marker per spoken word, tying a
//! playback time to a character range of the submitted text. The store keeps
//! them exactly as received; malformed entries are dropped at load time so the
//! synchronizer never has to revalidate per tick.

use serde::Deserialize;
use tracing::warn;

/// A validated timing marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechMark {
    /// Playback offset in milliseconds.
    pub time: f64,
    /// Half-open character range into the synthesized text.
    pub start: usize,
    pub end: usize,
    pub value: String,
}

/// Wire shape: every field is optional because the service contract only
/// promises best effort. Missing timing fields make a mark unusable.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpeechMark {
    pub time: Option<f64>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    #[serde(default)]
    pub value: String,
}

/// Ordered, read-only sequence of speech marks for the current audio.
#[derive(Debug, Default)]
pub struct MarkStore {
    marks: Vec<SpeechMark>,
}

impl MarkStore {
    /// Validate raw marks, dropping any with missing timing fields.
    ///
    /// The upstream contract says times ascend; we verify rather than assume,
    /// and keep out-of-order marks (the interval logic tolerates them).
    pub fn from_raw(raw: Vec<RawSpeechMark>) -> Self {
        let total = raw.len();
        let marks: Vec<SpeechMark> = raw
            .into_iter()
            .filter_map(|m| match (m.time, m.start, m.end) {
                (Some(time), Some(start), Some(end)) if time.is_finite() => Some(SpeechMark {
                    time,
                    start,
                    end,
                    value: m.value,
                }),
                _ => None,
            })
            .collect();
        if marks.len() < total {
            warn!(
                dropped = total - marks.len(),
                kept = marks.len(),
                "Dropped malformed speech marks"
            );
        }
        if marks.windows(2).any(|pair| pair[1].time < pair[0].time) {
            warn!("Speech mark times are not ascending; upstream invariant violated");
        }
        Self { marks }
    }

    pub fn as_slice(&self) -> &[SpeechMark] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(time: Option<f64>, start: Option<usize>, end: Option<usize>) -> RawSpeechMark {
        RawSpeechMark {
            time,
            start,
            end,
            value: String::new(),
        }
    }

    #[test]
    fn drops_marks_with_missing_fields() {
        let store = MarkStore::from_raw(vec![
            raw(Some(0.0), Some(0), Some(2)),
            raw(None, Some(2), Some(4)),
            raw(Some(500.0), None, Some(6)),
            raw(Some(900.0), Some(6), None),
            raw(Some(1200.0), Some(6), Some(8)),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[1].start, 6);
    }

    #[test]
    fn drops_non_finite_times() {
        let store = MarkStore::from_raw(vec![raw(Some(f64::NAN), Some(0), Some(1))]);
        assert!(store.is_empty());
    }

    #[test]
    fn keeps_out_of_order_marks() {
        let store = MarkStore::from_raw(vec![
            raw(Some(800.0), Some(4), Some(6)),
            raw(Some(100.0), Some(0), Some(4)),
        ]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_input_is_a_valid_state() {
        let store = MarkStore::from_raw(Vec::new());
        assert!(store.is_empty());
    }
}
