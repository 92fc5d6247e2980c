//! Vocabulary ledger and flashcard deck export.
//!
//! Saved entries live only for the session. Export writes a `;`-separated
//! file (prompt, answer, tags per record) with RFC-4180-style quoting so deck
//! importers parse definitions containing delimiters, quotes, or newlines.

use crate::segment::{DictEntry, Phrase};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const EXPORT_DELIMITER: char = ';';

/// One saved phrase, keyed by its text.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry {
    pub text: String,
    pub pinyin: String,
    pub definition: String,
    pub all_entries: Vec<DictEntry>,
}

impl VocabEntry {
    pub fn from_phrase(phrase: &Phrase) -> Self {
        Self {
            text: phrase.text.clone(),
            pinyin: phrase.pinyin.clone(),
            definition: phrase.definition.clone(),
            all_entries: phrase.all_entries.clone(),
        }
    }
}

/// In-memory set of saved entries, unique by phrase text, insertion-ordered.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<VocabEntry>,
}

impl Ledger {
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text == text)
    }

    /// Add if absent, remove if present; returns true when the entry is now
    /// saved.
    pub fn toggle(&mut self, entry: VocabEntry) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.text == entry.text) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Quote a field when it contains the delimiter, a comma, a newline, or a
/// quote; embedded quotes are doubled.
fn quote_field(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| c == EXPORT_DELIMITER || c == ',' || c == '\n' || c == '\r' || c == '"');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the full deck: one `prompt;answer;tags` record per entry.
pub fn render_deck(entries: &[VocabEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let answer = if entry.pinyin.is_empty() {
            entry.definition.clone()
        } else {
            format!("{} - {}", entry.pinyin, entry.definition)
        };
        out.push_str(&quote_field(&entry.text));
        out.push(EXPORT_DELIMITER);
        out.push_str(&quote_field(&answer));
        out.push(EXPORT_DELIMITER);
        out.push_str(&quote_field("hanzi-reader"));
        out.push('\n');
    }
    out
}

pub fn deck_filename() -> String {
    format!("vocabulary-{}.csv", Local::now().format("%Y-%m-%d"))
}

/// Write the deck to the export directory, returning the file path.
pub fn export_deck(entries: &[VocabEntry], export_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(export_dir)
        .with_context(|| format!("Creating export directory {}", export_dir.display()))?;
    let path = export_dir.join(deck_filename());
    fs::write(&path, render_deck(entries))
        .with_context(|| format!("Writing deck to {}", path.display()))?;
    info!(path = %path.display(), entry_count = entries.len(), "Exported vocabulary deck");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, pinyin: &str, definition: &str) -> VocabEntry {
        VocabEntry {
            text: text.to_string(),
            pinyin: pinyin.to_string(),
            definition: definition.to_string(),
            all_entries: Vec::new(),
        }
    }

    /// Minimal RFC-4180 field reader used to check the export round-trips.
    fn parse_record(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        current.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current.push(c);
                }
            } else if c == '"' {
                in_quotes = true;
            } else if c == EXPORT_DELIMITER {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        fields.push(current);
        fields
    }

    #[test]
    fn ledger_toggle_adds_then_removes() {
        let mut ledger = Ledger::default();
        assert!(ledger.toggle(entry("你好", "nǐ hǎo", "hello")));
        assert!(ledger.contains("你好"));
        assert!(!ledger.toggle(entry("你好", "nǐ hǎo", "hello")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn ledger_enforces_uniqueness_by_text() {
        let mut ledger = Ledger::default();
        ledger.toggle(entry("好", "hǎo", "good"));
        ledger.toggle(entry("了", "le", "particle"));
        assert_eq!(ledger.len(), 2);
        ledger.toggle(entry("好", "hào", "to like"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].text, "了");
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let deck = render_deck(&[entry("好", "hǎo", "good")]);
        assert_eq!(deck, "好;hǎo - good;hanzi-reader\n");
    }

    #[test]
    fn tricky_definition_round_trips_through_quoting() {
        let definition = "to be, \"to exist\";\nalso: particle";
        let deck = render_deck(&[entry("是", "shì", definition)]);
        // Record spans two physical lines because of the embedded newline;
        // parse the whole record minus its trailing terminator.
        let record = deck.trim_end_matches('\n');
        let fields = parse_record(record);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "是");
        assert_eq!(fields[1], format!("shì - {definition}"));
        assert_eq!(fields[2], "hanzi-reader");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let deck = render_deck(&[entry("引", "yǐn", "to \"quote\"")]);
        assert!(deck.contains(r#""yǐn - to ""quote""""#));
    }

    #[test]
    fn filename_is_date_stamped() {
        let name = deck_filename();
        assert!(name.starts_with("vocabulary-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "vocabulary-2026-08-25.csv".len());
    }
}
