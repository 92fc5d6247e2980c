use super::messages::Message;
use super::state::{
    App, MAX_FONT_SIZE, MAX_LINE_SPACING, MAX_TRAILING_MS_PER_CHAR, MIN_FONT_SIZE,
    MIN_LINE_SPACING, MIN_TRAILING_MS_PER_CHAR, PlaybackLifecycle, TEXT_SCROLL_ID,
};
use crate::config::ThemeMode;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, checkbox, column, container, horizontal_space, row, scrollable, slider,
    text, text_editor,
};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let editor = text_editor(&self.editor)
            .placeholder("Paste Chinese text here…")
            .on_action(Message::EditorAction)
            .height(Length::Fixed(120.0));

        let mut content: Column<'_, Message> = column![
            self.toolbar(),
            editor,
            self.reading_area(),
            self.playback_controls(),
        ]
        .padding(16)
        .spacing(12)
        .height(Length::Fill);

        if let Some(status) = &self.status {
            content = content.push(
                row![
                    text(status.clone()).width(Length::Fill),
                    button("Dismiss").on_press(Message::DismissStatus),
                ]
                .spacing(8)
                .align_y(Vertical::Center),
            );
        }

        let mut layout: Row<'_, Message> = row![container(content).width(Length::Fill)].spacing(16);
        if self.show_vocab {
            layout = layout.push(self.side_panel());
        }
        if self.show_settings {
            layout = layout.push(self.settings_panel());
        }
        layout.into()
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let process_button = if self.busy() {
            button("Process")
        } else {
            button("Process").on_press(Message::ProcessRequested)
        };
        let read_button = if self.busy() || !self.reader.has_content() {
            button("Read Aloud")
        } else {
            button("Read Aloud").on_press(Message::ReadAloudRequested)
        };

        let theme_toggle = button(match self.config.theme {
            ThemeMode::Night => "Day Mode",
            ThemeMode::Day => "Night Mode",
        })
        .on_press(Message::ToggleTheme);
        let settings_toggle = button(if self.show_settings {
            "Hide Settings"
        } else {
            "Show Settings"
        })
        .on_press(Message::ToggleSettings);
        let vocab_toggle = button(if self.show_vocab {
            "Hide Vocabulary"
        } else {
            "Show Vocabulary"
        })
        .on_press(Message::ToggleVocabPanel);

        let backend_label = match self.backend_online {
            Some(true) => "Backend: online",
            Some(false) => "Backend: offline",
            None => "Backend: checking…",
        };
        let mut toolbar = row![
            process_button,
            read_button,
            theme_toggle,
            settings_toggle,
            vocab_toggle,
            horizontal_space(),
            text(backend_label),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        if self.reader.demo_mode {
            toolbar = toolbar.push(text("(offline segmentation)"));
        }
        toolbar.into()
    }

    fn reading_area(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = if self.reader.phrases.is_empty() {
            text("Process some text to begin reading.")
                .size(self.config.font_size as f32)
                .into()
        } else {
            let active = self.active_phrase_indices();
            let highlight = self.highlight_color();

            let spans: Vec<iced::widget::text::Span<'_, Message>> = self
                .reader
                .phrases
                .iter()
                .enumerate()
                .map(|(idx, phrase)| {
                    let mut span: iced::widget::text::Span<'_, Message> =
                        iced::widget::text::Span::new(phrase.text.clone())
                            .size(self.config.font_size as f32)
                            .line_height(LineHeight::Relative(self.config.line_spacing));

                    if !phrase.is_line_break() {
                        span = span.link(Message::PhraseClicked(idx));
                    }
                    if active.contains(&idx) {
                        span = span
                            .background(iced::Background::Color(highlight))
                            .padding(iced::Padding::from(2u16));
                    }
                    span
                })
                .collect();

            iced::widget::text::Rich::with_spans(spans)
                .width(Length::Fill)
                .wrapping(Wrapping::WordOrGlyph)
                .align_x(Horizontal::Left)
                .into()
        };

        scrollable(
            container(body)
                .width(Length::Fill)
                .padding([self.config.margin_vertical, self.config.margin_horizontal]),
        )
        .on_scroll(|viewport| Message::Scrolled {
            offset: viewport.relative_offset(),
            viewport_height: viewport.bounds().height,
            content_height: viewport.content_bounds().height,
        })
        .id(TEXT_SCROLL_ID.clone())
        .height(Length::FillPortion(1))
        .into()
    }

    fn playback_controls(&self) -> Element<'_, Message> {
        let lifecycle = self.playback.lifecycle;
        let toggle_label = if lifecycle == PlaybackLifecycle::Playing {
            "Pause"
        } else {
            "Play"
        };
        let can_toggle = matches!(
            lifecycle,
            PlaybackLifecycle::Playing | PlaybackLifecycle::Paused | PlaybackLifecycle::Ready
        );
        let toggle_button = if can_toggle {
            button(toggle_label).on_press(Message::TogglePlayPause)
        } else {
            button(toggle_label)
        };
        let stop_button = if lifecycle == PlaybackLifecycle::Idle {
            button("Stop")
        } else {
            button("Stop").on_press(Message::StopPlayback)
        };

        let state_label = match lifecycle {
            PlaybackLifecycle::Idle => "",
            PlaybackLifecycle::Loading => "Requesting audio…",
            PlaybackLifecycle::Ready => "Ready",
            PlaybackLifecycle::Playing => "Playing",
            PlaybackLifecycle::Paused => "Paused",
            PlaybackLifecycle::Ended => "Finished",
        };

        row![toggle_button, stop_button, text(state_label)]
            .spacing(10)
            .align_y(Vertical::Center)
            .width(Length::Fill)
            .into()
    }

    /// Vocabulary column: the selected phrase's dictionary detail on top,
    /// the saved list with the export action below.
    fn side_panel(&self) -> Element<'_, Message> {
        let mut panel: Column<'_, Message> = column![].spacing(12).width(Length::Fixed(280.0));

        if let Some(idx) = self.reader.selected_phrase {
            if let Some(phrase) = self.reader.phrases.get(idx) {
                let mut detail: Column<'_, Message> = column![
                    text(phrase.text.clone()).size(28.0),
                    text(phrase.pinyin.clone()).size(18.0),
                    text(phrase.definition.clone()),
                ]
                .spacing(4);

                for entry in phrase.all_entries.iter().skip(1) {
                    detail = detail.push(
                        text(format!("{} - {}", entry.pinyin, entry.definition)).size(14.0),
                    );
                }

                let vocab_label = if self.ledger.contains(&phrase.text) {
                    "Remove from vocabulary"
                } else {
                    "Add to vocabulary"
                };
                detail = detail.push(button(vocab_label).on_press(Message::ToggleVocab(idx)));
                panel = panel.push(container(detail).padding(8));
            }
        }

        let mut vocab_list: Column<'_, Message> =
            column![text(format!("Vocabulary ({})", self.ledger.len())).size(18.0)].spacing(4);
        for entry in self.ledger.entries() {
            vocab_list = vocab_list.push(text(format!("{} · {}", entry.text, entry.pinyin)));
        }
        let export_button = if self.ledger.is_empty() {
            button("Export Deck")
        } else {
            button("Export Deck").on_press(Message::ExportDeck)
        };
        vocab_list = vocab_list.push(export_button);

        panel = panel.push(scrollable(vocab_list).height(Length::FillPortion(1)));
        container(panel).padding(12).into()
    }

    fn settings_panel(&self) -> Element<'_, Message> {
        let font_slider = slider(
            MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
            self.config.font_size as f32,
            |value| Message::FontSizeChanged(value.round() as u32),
        );
        let spacing_slider = slider(
            MIN_LINE_SPACING..=MAX_LINE_SPACING,
            self.config.line_spacing,
            Message::LineSpacingChanged,
        )
        .step(0.05);
        let trailing_slider = slider(
            MIN_TRAILING_MS_PER_CHAR..=MAX_TRAILING_MS_PER_CHAR,
            self.config.trailing_ms_per_char,
            Message::TrailingMsPerCharChanged,
        )
        .step(1.0);

        let panel = column![
            text("Settings").size(20.0),
            row![text(format!("Font: {}", self.config.font_size)), font_slider]
                .spacing(8)
                .align_y(Vertical::Center),
            row![
                text(format!("Line spacing: {:.2}", self.config.line_spacing)),
                spacing_slider
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            row![
                text(format!(
                    "Last-phrase pacing: {:.0} ms/char",
                    self.config.trailing_ms_per_char
                )),
                trailing_slider
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            checkbox("Auto-scroll to spoken phrase", self.config.auto_scroll)
                .on_toggle(Message::AutoScrollChanged),
            checkbox("Center highlighted phrase", self.config.center_highlight)
                .on_toggle(Message::CenterHighlightChanged),
        ]
        .spacing(12)
        .width(Length::Fixed(280.0));

        container(panel).padding(12).into()
    }
}
