mod constants;
mod playback;
mod reader;

use crate::api::BackendClient;
use crate::config::{AppConfig, HighlightColor, ThemeMode};
use crate::export::Ledger;
use iced::Color;
use iced::Task;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::text_editor;
use std::collections::BTreeSet;
use std::time::Duration;

use super::messages::Message;

pub(crate) use constants::*;
pub(crate) use playback::PlaybackLifecycle;
pub(in crate::app) use playback::PlaybackState;
pub(in crate::app) use reader::ReaderState;

/// Viewport geometry reported by the reading scrollable, used to decide
/// whether a highlighted phrase is visible and where to scroll.
pub struct ScrollState {
    pub(in crate::app) last_offset: RelativeOffset,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) content_height: f32,
}

impl ScrollState {
    fn new() -> Self {
        Self {
            last_offset: RelativeOffset::START,
            viewport_height: 0.0,
            content_height: 0.0,
        }
    }
}

/// Core application state composed of sub-models.
pub struct App {
    pub(in crate::app) editor: text_editor::Content,
    pub(in crate::app) reader: ReaderState,
    pub(in crate::app) playback: PlaybackState,
    pub(in crate::app) ledger: Ledger,
    pub(in crate::app) scroll: ScrollState,
    pub(in crate::app) config: AppConfig,
    pub(in crate::app) client: BackendClient,
    pub(in crate::app) processing: bool,
    pub(in crate::app) backend_online: Option<bool>,
    pub(in crate::app) status: Option<String>,
    pub(in crate::app) show_settings: bool,
    pub(in crate::app) show_vocab: bool,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        initial_text: Option<String>,
    ) -> (App, Task<Message>) {
        let client = BackendClient::new(
            &config.backend_url,
            Duration::from_secs_f32(config.request_timeout_secs),
        );
        let trailing = config.trailing_ms_per_char;
        let app = App {
            editor: match &initial_text {
                Some(text) => text_editor::Content::with_text(text),
                None => text_editor::Content::new(),
            },
            reader: ReaderState::empty(),
            playback: PlaybackState::new(trailing),
            ledger: Ledger::default(),
            scroll: ScrollState::new(),
            config,
            client,
            processing: false,
            backend_online: None,
            status: None,
            show_settings: false,
            show_vocab: true,
        };

        let probe_client = app.client.clone();
        let init_task = Task::perform(
            async move {
                let online = tokio::task::spawn_blocking(move || probe_client.health().is_ok())
                    .await
                    .unwrap_or(false);
                Message::HealthChecked { online }
            },
            |message| message,
        );
        tracing::info!(
            backend = %app.config.backend_url,
            preloaded = initial_text.is_some(),
            "Initialized app state"
        );
        (app, init_task)
    }

    /// Phrase indices currently highlighted, derived from the active span set.
    pub(in crate::app) fn active_phrase_indices(&self) -> BTreeSet<usize> {
        self.playback
            .synchronizer
            .active()
            .iter()
            .filter_map(|span_idx| self.reader.spans.get(*span_idx))
            .map(|span| span.phrase_idx)
            .collect()
    }

    /// The triggering controls stay disabled while any request is in flight.
    pub(in crate::app) fn busy(&self) -> bool {
        self.processing || self.playback.is_loading()
    }

    pub(in crate::app) fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub(in crate::app) fn highlight_color(&self) -> Color {
        let base: HighlightColor = if matches!(self.config.theme, ThemeMode::Night) {
            self.config.night_highlight
        } else {
            self.config.day_highlight
        };
        Color {
            r: base.r,
            g: base.g,
            b: base.b,
            a: base.a,
        }
    }
}
