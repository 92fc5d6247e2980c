//! Highlight synchronization between playback time and phrase spans.
//!
//! Everything here is pure: the synchronizer maps a playback position to a
//! set of span indices and diffs it against the previous set. The view layer
//! owns the mapping from index to widget, so this module stays testable
//! without any UI.

use crate::marks::SpeechMark;
use crate::segment::PhraseSpan;
use std::collections::BTreeSet;

/// Fallback estimate for the last mark's spoken duration, per character.
/// No following mark bounds it, so its end time must be guessed. Tunable via
/// `trailing_ms_per_char` in the config.
pub const DEFAULT_TRAILING_MS_PER_CHAR: f64 = 50.0;

/// Spans to highlight and un-highlight on this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightDiff {
    pub to_add: Vec<usize>,
    pub to_remove: Vec<usize>,
}

impl HighlightDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute the set of span indices active at `time_ms`.
///
/// A mark is active over `[time, next_time)`, where `next_time` is the
/// following mark's time or, for the last mark, an estimate derived from its
/// character length. A span is active when it strictly overlaps an active
/// mark's character range; touching boundaries do not count. All active marks
/// contribute to the union.
pub fn active_spans(
    time_ms: f64,
    marks: &[SpeechMark],
    spans: &[PhraseSpan],
    trailing_ms_per_char: f64,
) -> BTreeSet<usize> {
    let mut active = BTreeSet::new();
    for (i, mark) in marks.iter().enumerate() {
        let end_time = match marks.get(i + 1) {
            Some(next) => next.time,
            None => {
                let chars = mark.end.saturating_sub(mark.start) as f64;
                mark.time + chars * trailing_ms_per_char
            }
        };
        if time_ms < mark.time || time_ms >= end_time {
            continue;
        }
        for (span_idx, span) in spans.iter().enumerate() {
            if mark.start < span.end_index && mark.end > span.start_index {
                active.insert(span_idx);
            }
        }
    }
    active
}

/// Diff two active sets into the minimal add/remove lists.
pub fn diff(previous: &BTreeSet<usize>, next: &BTreeSet<usize>) -> HighlightDiff {
    HighlightDiff {
        to_add: next.difference(previous).copied().collect(),
        to_remove: previous.difference(next).copied().collect(),
    }
}

/// Owns the previously active set so callers get incremental diffs per tick.
#[derive(Debug)]
pub struct Synchronizer {
    active: BTreeSet<usize>,
    trailing_ms_per_char: f64,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_TRAILING_MS_PER_CHAR)
    }
}

impl Synchronizer {
    pub fn new(trailing_ms_per_char: f64) -> Self {
        Self {
            active: BTreeSet::new(),
            trailing_ms_per_char: if trailing_ms_per_char > 0.0 {
                trailing_ms_per_char
            } else {
                DEFAULT_TRAILING_MS_PER_CHAR
            },
        }
    }

    /// Advance to `time_ms`, returning what changed since the last tick.
    pub fn tick(&mut self, time_ms: f64, marks: &[SpeechMark], spans: &[PhraseSpan]) -> HighlightDiff {
        let next = active_spans(time_ms, marks, spans, self.trailing_ms_per_char);
        let changes = diff(&self.active, &next);
        self.active = next;
        changes
    }

    /// Forcibly clear all highlights (stop, end of playback, new content).
    pub fn clear(&mut self) -> HighlightDiff {
        let changes = HighlightDiff {
            to_add: Vec::new(),
            to_remove: self.active.iter().copied().collect(),
        };
        self.active.clear();
        changes
    }

    pub fn active(&self) -> &BTreeSet<usize> {
        &self.active
    }

    /// Adjust the trailing window; takes effect on the next tick. Values
    /// that are zero, negative, or non-finite are ignored.
    pub fn set_trailing_ms_per_char(&mut self, trailing_ms_per_char: f64) {
        if trailing_ms_per_char.is_finite() && trailing_ms_per_char > 0.0 {
            self.trailing_ms_per_char = trailing_ms_per_char;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(time: f64, start: usize, end: usize) -> SpeechMark {
        SpeechMark {
            time,
            start,
            end,
            value: String::new(),
        }
    }

    fn span(phrase_idx: usize, start: usize, end: usize) -> PhraseSpan {
        PhraseSpan {
            phrase_idx,
            start_index: start,
            end_index: end,
        }
    }

    fn fixture() -> (Vec<SpeechMark>, Vec<PhraseSpan>) {
        (
            vec![mark(0.0, 0, 2), mark(500.0, 2, 5)],
            vec![span(0, 0, 2), span(1, 2, 5)],
        )
    }

    #[test]
    fn selects_span_under_the_active_mark() {
        let (marks, spans) = fixture();
        let at_200 = active_spans(200.0, &marks, &spans, 50.0);
        assert_eq!(at_200.into_iter().collect::<Vec<_>>(), vec![0]);
        let at_600 = active_spans(600.0, &marks, &spans, 50.0);
        assert_eq!(at_600.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn mark_intervals_are_half_open() {
        let (marks, spans) = fixture();
        // At exactly t=500 the first mark has ended and the second has begun.
        let at_500 = active_spans(500.0, &marks, &spans, 50.0);
        assert_eq!(at_500.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn before_first_mark_nothing_is_active() {
        let (marks, spans) = fixture();
        assert!(active_spans(-1.0, &marks, &spans, 50.0).is_empty());
        let late_start = vec![mark(300.0, 0, 2)];
        assert!(active_spans(299.9, &late_start, &spans, 50.0).is_empty());
    }

    #[test]
    fn last_mark_uses_trailing_estimate() {
        let (marks, spans) = fixture();
        // Last mark covers 3 chars: active until 500 + 3 * 50 = 650.
        assert!(!active_spans(649.0, &marks, &spans, 50.0).is_empty());
        assert!(active_spans(650.0, &marks, &spans, 50.0).is_empty());
    }

    #[test]
    fn touching_offset_boundaries_do_not_overlap() {
        let marks = vec![mark(0.0, 2, 4)];
        let spans = vec![span(0, 0, 2), span(1, 4, 6)];
        assert!(active_spans(100.0, &marks, &spans, 50.0).is_empty());
    }

    #[test]
    fn overlapping_marks_union_their_spans() {
        let marks = vec![mark(0.0, 0, 3), mark(0.0, 2, 5)];
        let spans = vec![span(0, 0, 2), span(1, 2, 4), span(2, 4, 6)];
        let active = active_spans(50.0, &marks, &spans, 50.0);
        assert_eq!(active.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_marks_never_highlight() {
        let (_, spans) = fixture();
        assert!(active_spans(100.0, &[], &spans, 50.0).is_empty());
    }

    #[test]
    fn tick_is_idempotent() {
        let (marks, spans) = fixture();
        let mut sync = Synchronizer::new(50.0);
        let first = sync.tick(200.0, &marks, &spans);
        assert_eq!(first.to_add, vec![0]);
        assert!(first.to_remove.is_empty());
        let second = sync.tick(200.0, &marks, &spans);
        assert!(second.is_empty());
    }

    #[test]
    fn tick_moves_the_highlight_with_minimal_churn() {
        let (marks, spans) = fixture();
        let mut sync = Synchronizer::new(50.0);
        sync.tick(200.0, &marks, &spans);
        let moved = sync.tick(600.0, &marks, &spans);
        assert_eq!(moved.to_add, vec![1]);
        assert_eq!(moved.to_remove, vec![0]);
    }

    #[test]
    fn clear_removes_everything() {
        let (marks, spans) = fixture();
        let mut sync = Synchronizer::new(50.0);
        sync.tick(200.0, &marks, &spans);
        let cleared = sync.clear();
        assert_eq!(cleared.to_remove, vec![0]);
        assert!(sync.active().is_empty());
        assert!(sync.clear().is_empty());
    }

    #[test]
    fn diff_of_equal_sets_is_empty() {
        let a: BTreeSet<usize> = [1, 2, 3].into_iter().collect();
        assert!(diff(&a, &a).is_empty());
    }
}
