use crate::audio::AudioPlayback;
use crate::marks::MarkStore;
use crate::sync::Synchronizer;

/// Playback controller lifecycle.
///
/// `Idle` is reachable from every state via reset or new content; any
/// transition into it tears down the previous audio handle first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLifecycle {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
}

pub struct PlaybackState {
    pub(in crate::app) lifecycle: PlaybackLifecycle,
    pub(in crate::app) playback: Option<AudioPlayback>,
    pub(in crate::app) marks: MarkStore,
    pub(in crate::app) synchronizer: Synchronizer,
    pub(in crate::app) request_id: u64,
}

impl PlaybackState {
    pub(in crate::app) fn new(trailing_ms_per_char: f64) -> Self {
        Self {
            lifecycle: PlaybackLifecycle::Idle,
            playback: None,
            marks: MarkStore::default(),
            synchronizer: Synchronizer::new(trailing_ms_per_char),
            request_id: 0,
        }
    }

    pub(in crate::app) fn is_loading(&self) -> bool {
        self.lifecycle == PlaybackLifecycle::Loading
    }

    pub(in crate::app) fn is_playing(&self) -> bool {
        self.lifecycle == PlaybackLifecycle::Playing
    }

    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Stop and drop the audio handle and clear all highlights.
    ///
    /// Every entry point that replaces the playback resource goes through
    /// here first, so at most one handle is ever live.
    pub(in crate::app) fn teardown(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
        self.synchronizer.clear();
        self.lifecycle = PlaybackLifecycle::Idle;
    }

    /// Teardown plus mark reset, for when the underlying text changes.
    pub(in crate::app) fn reset_for_new_content(&mut self) {
        self.teardown();
        self.marks = MarkStore::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::{MarkStore, RawSpeechMark};

    fn raw_mark(time: f64) -> RawSpeechMark {
        RawSpeechMark {
            time: Some(time),
            start: Some(0),
            end: Some(1),
            value: String::new(),
        }
    }

    #[test]
    fn teardown_returns_to_idle_without_audio() {
        let mut state = PlaybackState::new(50.0);
        state.lifecycle = PlaybackLifecycle::Playing;
        state.teardown();
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
        assert!(state.playback.is_none());
        assert!(state.synchronizer.active().is_empty());
    }

    #[test]
    fn new_content_also_discards_marks() {
        let mut state = PlaybackState::new(50.0);
        state.marks = MarkStore::from_raw(vec![raw_mark(0.0), raw_mark(400.0)]);
        assert_eq!(state.marks.len(), 2);
        state.reset_for_new_content();
        assert!(state.marks.is_empty());
        assert_eq!(state.lifecycle, PlaybackLifecycle::Idle);
    }

    #[test]
    fn request_ids_increase() {
        let mut state = PlaybackState::new(50.0);
        let a = state.next_request_id();
        let b = state.next_request_id();
        assert!(b > a);
    }
}
