use super::super::messages::Message;
use super::super::state::{App, TEXT_SCROLL_ID};
use super::Effect;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use iced::{Event, event::Status};
use tracing::info;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::ProcessText { text, request_id } => {
                let client = self.client.clone();
                info!(request_id, chars = text.chars().count(), "Dispatching segmentation request");
                Task::perform(
                    async move {
                        let submitted_text = text.clone();
                        // The HTTP client is blocking; keep it off the executor.
                        let outcome =
                            tokio::task::spawn_blocking(move || client.process(&text)).await;
                        match outcome {
                            Ok(Ok(phrases)) => Message::TextProcessed {
                                request_id,
                                submitted_text,
                                phrases,
                                error: None,
                            },
                            Ok(Err(err)) => Message::TextProcessed {
                                request_id,
                                submitted_text,
                                phrases: Vec::new(),
                                error: Some(format!("{err:#}")),
                            },
                            Err(err) => Message::TextProcessed {
                                request_id,
                                submitted_text,
                                phrases: Vec::new(),
                                error: Some(format!("request task failed: {err}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::FetchReadAloud { text, request_id } => {
                let client = self.client.clone();
                info!(request_id, chars = text.chars().count(), "Dispatching synthesis request");
                Task::perform(
                    async move {
                        let outcome =
                            tokio::task::spawn_blocking(move || client.read_aloud(&text)).await;
                        match outcome {
                            Ok(Ok(payload)) => Message::ReadAloudReady {
                                request_id,
                                audio: payload.audio,
                                marks: payload.speech_marks,
                                error: None,
                            },
                            Ok(Err(err)) => Message::ReadAloudReady {
                                request_id,
                                audio: Vec::new(),
                                marks: Vec::new(),
                                error: Some(format!("{err:#}")),
                            },
                            Err(err) => Message::ReadAloudReady {
                                request_id,
                                audio: Vec::new(),
                                marks: Vec::new(),
                                error: Some(format!("request task failed: {err}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::AutoScrollToPhrase(phrase_idx) => {
                if !self.config.auto_scroll {
                    return Task::none();
                }
                if let Some(offset) = self.scroll_offset_for_phrase(phrase_idx) {
                    self.scroll.last_offset = offset;
                    return iced::widget::scrollable::snap_to(TEXT_SCROLL_ID.clone(), offset);
                }
                Task::none()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
