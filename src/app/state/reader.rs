use crate::segment::{Phrase, PhraseSpan, build_span_index, synthesis_text};
use tracing::warn;

/// Reader-related model: the processed text and its span index.
///
/// Rebuilt from scratch whenever new content is processed; no phrase or span
/// outlives the rendering it came from.
pub struct ReaderState {
    pub(in crate::app) phrases: Vec<Phrase>,
    pub(in crate::app) spans: Vec<PhraseSpan>,
    pub(in crate::app) synthesis_text: String,
    pub(in crate::app) selected_phrase: Option<usize>,
    pub(in crate::app) demo_mode: bool,
}

impl ReaderState {
    pub(in crate::app) fn empty() -> Self {
        Self {
            phrases: Vec::new(),
            spans: Vec::new(),
            synthesis_text: String::new(),
            selected_phrase: None,
            demo_mode: false,
        }
    }

    /// Install freshly processed phrases, rebuilding the span index.
    ///
    /// Verifies that concatenating the phrase texts reconstructs the text that
    /// was submitted; a mismatch means mark offsets will not line up, which is
    /// logged rather than silently mis-highlighted.
    pub(in crate::app) fn install(&mut self, phrases: Vec<Phrase>, submitted_text: &str, demo_mode: bool) {
        let reconstructed: String = phrases.iter().map(|p| p.text.as_str()).collect();
        if reconstructed != submitted_text {
            warn!(
                submitted_chars = submitted_text.chars().count(),
                reconstructed_chars = reconstructed.chars().count(),
                "Phrase concatenation does not reconstruct the submitted text; \
                 highlight offsets may be wrong"
            );
        }
        self.spans = build_span_index(&phrases);
        self.synthesis_text = synthesis_text(&phrases);
        self.phrases = phrases;
        self.selected_phrase = None;
        self.demo_mode = demo_mode;
    }

    pub(in crate::app) fn has_content(&self) -> bool {
        !self.spans.is_empty()
    }

    pub(in crate::app) fn select_phrase_checked(&mut self, phrase_idx: usize) {
        if phrase_idx < self.phrases.len() && !self.phrases[phrase_idx].is_line_break() {
            self.selected_phrase = Some(phrase_idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase(text: &str) -> Phrase {
        Phrase {
            text: text.to_string(),
            pinyin: String::new(),
            definition: String::new(),
            all_entries: Vec::new(),
        }
    }

    #[test]
    fn install_rebuilds_index_and_clears_selection() {
        let mut reader = ReaderState::empty();
        reader.selected_phrase = Some(7);
        reader.install(vec![phrase("你好"), phrase("\n"), phrase("吗")], "你好\n吗", false);
        assert_eq!(reader.spans.len(), 2);
        assert_eq!(reader.synthesis_text, "你好吗");
        assert_eq!(reader.selected_phrase, None);
        assert!(reader.has_content());
    }

    #[test]
    fn line_breaks_cannot_be_selected() {
        let mut reader = ReaderState::empty();
        reader.install(vec![phrase("好"), phrase("\n")], "好\n", false);
        reader.select_phrase_checked(1);
        assert_eq!(reader.selected_phrase, None);
        reader.select_phrase_checked(0);
        assert_eq!(reader.selected_phrase, Some(0));
    }
}
