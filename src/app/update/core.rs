use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use iced::keyboard::{Key, Modifiers, key};
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![iced::event::listen_with(super::runtime::runtime_event_to_message)];

        // The media clock is only worth polling while audio is playing.
        if app.playback.is_playing() {
            subscriptions
                .push(time::every(Duration::from_millis(app.config.tick_interval_ms)).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::EditorAction(action) => self.editor.perform(action),
            Message::ProcessRequested => self.handle_process_requested(&mut effects),
            Message::TextProcessed {
                request_id,
                submitted_text,
                phrases,
                error,
            } => self.handle_text_processed(request_id, submitted_text, phrases, error),
            Message::ReadAloudRequested => self.handle_read_aloud_requested(&mut effects),
            Message::ReadAloudReady {
                request_id,
                audio,
                marks,
                error,
            } => self.handle_read_aloud_ready(request_id, audio, marks, error),
            Message::TogglePlayPause => self.handle_toggle_play_pause(),
            Message::StopPlayback => self.handle_stop_playback(),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::PhraseClicked(idx) => self.handle_phrase_clicked(idx),
            Message::ToggleVocab(idx) => self.handle_toggle_vocab(idx),
            Message::ExportDeck => self.handle_export_deck(),
            Message::HealthChecked { online } => self.handle_health_checked(online),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::ToggleSettings => self.show_settings = !self.show_settings,
            Message::ToggleVocabPanel => self.show_vocab = !self.show_vocab,
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size),
            Message::LineSpacingChanged(spacing) => self.handle_line_spacing_changed(spacing),
            Message::AutoScrollChanged(enabled) => self.config.auto_scroll = enabled,
            Message::CenterHighlightChanged(centered) => self.config.center_highlight = centered,
            Message::TrailingMsPerCharChanged(value) => {
                self.handle_trailing_ms_per_char_changed(value)
            }
            Message::DismissStatus => self.status = None,
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = Self::shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Scrolled {
                offset,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset, viewport_height, content_height),
        }

        effects
    }

    fn shortcut_message_for_key(key: Key, modifiers: Modifiers) -> Option<Message> {
        if modifiers.command() || modifiers.alt() {
            return None;
        }
        match key {
            // Text entry owns the keyboard; only spare keys are global.
            Key::Named(key::Named::MediaPlayPause) => Some(Message::TogglePlayPause),
            Key::Named(key::Named::MediaStop) => Some(Message::StopPlayback),
            _ => None,
        }
    }
}
