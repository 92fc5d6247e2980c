use super::super::state::{App, PlaybackLifecycle, PlaybackState};
use super::Effect;
use crate::audio::AudioPlayback;
use crate::fallback::segment_by_character_class;
use crate::marks::{MarkStore, RawSpeechMark};
use crate::segment::Phrase;
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_process_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.busy() {
            return;
        }
        let text = self.editor.text();
        if text.trim().is_empty() {
            self.set_status("Nothing to process: enter some text first");
            return;
        }
        // New content invalidates the previous audio, marks, and highlights.
        self.playback.reset_for_new_content();
        self.processing = true;
        self.status = None;
        let request_id = self.playback.next_request_id();
        info!(request_id, "Processing new text");
        effects.push(Effect::ProcessText { text, request_id });
    }

    pub(super) fn handle_text_processed(
        &mut self,
        request_id: u64,
        submitted_text: String,
        phrases: Vec<Phrase>,
        error: Option<String>,
    ) {
        if request_id != self.playback.request_id {
            debug!(request_id, current = self.playback.request_id, "Ignoring stale segmentation");
            return;
        }
        self.processing = false;
        match error {
            Some(err) => {
                warn!("Segmentation request failed: {err}");
                self.set_status(format!(
                    "Backend unavailable; showing offline segmentation. ({err})"
                ));
                let demo = segment_by_character_class(&submitted_text);
                self.reader.install(demo, &submitted_text, true);
            }
            None => {
                self.reader.install(phrases, &submitted_text, false);
                info!(
                    phrase_count = self.reader.phrases.len(),
                    span_count = self.reader.spans.len(),
                    "Installed processed text"
                );
            }
        }
    }

    pub(super) fn handle_read_aloud_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.busy() || !self.reader.has_content() {
            return;
        }
        // Replace the previous audio resource before requesting a new one.
        self.playback.reset_for_new_content();
        self.playback.lifecycle = PlaybackLifecycle::Loading;
        let request_id = self.playback.next_request_id();
        info!(request_id, "Requesting read-aloud audio");
        effects.push(Effect::FetchReadAloud {
            text: self.reader.synthesis_text.clone(),
            request_id,
        });
    }

    pub(super) fn handle_read_aloud_ready(
        &mut self,
        request_id: u64,
        audio: Vec<u8>,
        marks: Vec<RawSpeechMark>,
        error: Option<String>,
    ) {
        if request_id != self.playback.request_id {
            debug!(request_id, current = self.playback.request_id, "Ignoring stale synthesis");
            return;
        }
        if let Some(err) = error {
            warn!("Synthesis request failed: {err}");
            self.set_status(format!("Read-aloud failed: {err}"));
            self.playback.lifecycle = PlaybackLifecycle::Idle;
            return;
        }

        self.playback.marks = MarkStore::from_raw(marks);
        match AudioPlayback::load(audio) {
            Ok(playback) => {
                self.playback.playback = Some(playback);
                self.playback.lifecycle = PlaybackLifecycle::Ready;
                self.status = None;
                info!(mark_count = self.playback.marks.len(), "Audio ready");
                // Reading aloud was explicitly requested, so begin at once.
                self.handle_toggle_play_pause();
            }
            Err(err) => {
                // Playback refusal is non-fatal; the text stays readable.
                warn!("Could not start playback: {err:#}");
                self.set_status(format!("Could not start playback: {err:#}"));
                self.playback.teardown();
            }
        }
    }

    pub(super) fn handle_toggle_play_pause(&mut self) {
        match self.playback.lifecycle {
            PlaybackLifecycle::Playing => {
                if let Some(playback) = &self.playback.playback {
                    playback.pause();
                }
                self.playback.lifecycle = PlaybackLifecycle::Paused;
            }
            PlaybackLifecycle::Paused | PlaybackLifecycle::Ready => {
                if let Some(playback) = &self.playback.playback {
                    playback.resume();
                    self.playback.lifecycle = PlaybackLifecycle::Playing;
                }
            }
            PlaybackLifecycle::Idle
            | PlaybackLifecycle::Loading
            | PlaybackLifecycle::Ended => {}
        }
    }

    pub(super) fn handle_stop_playback(&mut self) {
        info!("Stopping playback");
        self.playback.teardown();
    }

    /// Driven by the playback-position subscription while audio is playing.
    /// Must stay cheap and idempotent: span and mark counts are bounded by
    /// the text length, and an unchanged position produces an empty diff.
    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let _ = now;
        let Some(playback) = &self.playback.playback else {
            return;
        };

        if playback.is_finished() {
            info!("Playback reached the end");
            self.playback.lifecycle = PlaybackLifecycle::Ended;
            if let Some(playback) = self.playback.playback.take() {
                playback.stop();
            }
            self.playback.synchronizer.clear();
            return;
        }
        if playback.is_paused() {
            return;
        }

        let time_ms = playback.position_ms();
        let PlaybackState {
            marks, synchronizer, ..
        } = &mut self.playback;
        let changes = synchronizer.tick(time_ms, marks.as_slice(), &self.reader.spans);
        if let Some(&span_idx) = changes.to_add.first() {
            if let Some(span) = self.reader.spans.get(span_idx) {
                effects.push(Effect::AutoScrollToPhrase(span.phrase_idx));
            }
        }
    }

    pub(super) fn handle_health_checked(&mut self, online: bool) {
        self.backend_online = Some(online);
        if online {
            info!("Backend reachable");
        } else {
            warn!("Backend unreachable; processing will fall back to offline segmentation");
        }
    }
}
