use super::super::state::App;
use crate::export::{VocabEntry, export_deck};
use std::path::Path;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_phrase_clicked(&mut self, phrase_idx: usize) {
        self.reader.select_phrase_checked(phrase_idx);
    }

    pub(super) fn handle_toggle_vocab(&mut self, phrase_idx: usize) {
        let Some(phrase) = self.reader.phrases.get(phrase_idx) else {
            return;
        };
        if phrase.is_line_break() {
            return;
        }
        let entry = VocabEntry::from_phrase(phrase);
        let added = self.ledger.toggle(entry);
        info!(
            phrase = %phrase.text,
            added,
            total = self.ledger.len(),
            "Toggled vocabulary entry"
        );
    }

    pub(super) fn handle_export_deck(&mut self) {
        if self.ledger.is_empty() {
            self.set_status("Vocabulary list is empty; nothing to export");
            return;
        }
        match export_deck(self.ledger.entries(), Path::new(&self.config.export_dir)) {
            Ok(path) => {
                info!(path = %path.display(), cards = self.ledger.len(), "Exported deck");
                self.set_status(format!("Exported {} cards to {}", self.ledger.len(), path.display()));
            }
            Err(err) => {
                warn!("Deck export failed: {err:#}");
                self.set_status(format!("Export failed: {err:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::segment::Phrase;

    fn phrase(text: &str, pinyin: &str) -> Phrase {
        Phrase {
            text: text.to_string(),
            pinyin: pinyin.to_string(),
            definition: String::new(),
            all_entries: Vec::new(),
        }
    }

    #[test]
    fn toggling_twice_removes_the_entry() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        app.reader
            .install(vec![phrase("你好", "nǐ hǎo")], "你好", false);
        app.handle_toggle_vocab(0);
        assert!(app.ledger.contains("你好"));
        app.handle_toggle_vocab(0);
        assert!(!app.ledger.contains("你好"));
    }

    #[test]
    fn line_breaks_never_enter_the_ledger() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        app.reader
            .install(vec![phrase("好", "hǎo"), phrase("\n", "")], "好\n", false);
        app.handle_toggle_vocab(1);
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn empty_ledger_export_only_sets_status() {
        let (mut app, _task) = App::bootstrap(AppConfig::default(), None);
        app.handle_export_deck();
        assert!(app.status.as_deref().is_some_and(|s| s.contains("empty")));
    }
}
