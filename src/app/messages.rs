use crate::marks::RawSpeechMark;
use crate::segment::Phrase;
use iced::keyboard::{Key, Modifiers};
use iced::widget::scrollable::RelativeOffset;
use iced::widget::text_editor;
use std::time::Instant;

/// Messages emitted by the UI and by background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    EditorAction(text_editor::Action),
    ProcessRequested,
    TextProcessed {
        request_id: u64,
        submitted_text: String,
        phrases: Vec<Phrase>,
        error: Option<String>,
    },
    ReadAloudRequested,
    ReadAloudReady {
        request_id: u64,
        audio: Vec<u8>,
        marks: Vec<RawSpeechMark>,
        error: Option<String>,
    },
    TogglePlayPause,
    StopPlayback,
    Tick(Instant),
    PhraseClicked(usize),
    ToggleVocab(usize),
    ExportDeck,
    HealthChecked {
        online: bool,
    },
    ToggleTheme,
    ToggleSettings,
    ToggleVocabPanel,
    FontSizeChanged(u32),
    LineSpacingChanged(f32),
    AutoScrollChanged(bool),
    CenterHighlightChanged(bool),
    TrailingMsPerCharChanged(f64),
    DismissStatus,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    },
}
