//! Phrase segments and the span index used for highlight synchronization.
//!
//! The backend returns one `Phrase` per lexical phrase or line break, in
//! document order. Speech marks address character offsets into the text
//! submitted for synthesis, which is the concatenation of all non-line-break
//! phrase texts. `build_span_index` derives that offset range for every
//! renderable phrase so the synchronizer can work on plain indices.

use serde::Deserialize;

/// One segmented phrase as returned by `/api/process`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Phrase {
    pub text: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub all_entries: Vec<DictEntry>,
}

/// A single dictionary reading (phrases can have several pronunciations).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DictEntry {
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub definition: String,
}

/// A phrase's character-offset range within the synthesized text.
///
/// Offsets count Unicode scalar values, matching what the synthesis service
/// emits in its speech marks. `start_index..end_index` is half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    pub phrase_idx: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl Phrase {
    /// Line-break entries are rendered as breaks, never spoken or indexed.
    pub fn is_line_break(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c == '\n' || c == '\r')
    }
}

/// The exact string submitted for speech synthesis: every non-line-break
/// phrase text, concatenated in document order.
pub fn synthesis_text(phrases: &[Phrase]) -> String {
    phrases
        .iter()
        .filter(|p| !p.is_line_break() && !p.text.is_empty())
        .map(|p| p.text.as_str())
        .collect()
}

/// Build the span index with a running cursor over the synthesized text.
///
/// Line-break and empty phrases consume no offset; all other phrases advance
/// the cursor by their character count, so spans are contiguous and their
/// concatenation reconstructs `synthesis_text` exactly.
pub fn build_span_index(phrases: &[Phrase]) -> Vec<PhraseSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for (idx, phrase) in phrases.iter().enumerate() {
        if phrase.is_line_break() || phrase.text.is_empty() {
            continue;
        }
        let len = phrase.text.chars().count();
        spans.push(PhraseSpan {
            phrase_idx: idx,
            start_index: cursor,
            end_index: cursor + len,
        });
        cursor += len;
    }
    spans
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
    fn spans_are_contiguous_and_skip_line_breaks() {
        let phrases = vec![
            phrase("你好"),
            phrase("，"),
            phrase("\n"),
            phrase("世界"),
        ];
        let spans = build_span_index(&phrases);
        assert_eq!(spans.len(), 3);
        assert_eq!((spans[0].start_index, spans[0].end_index), (0, 2));
        assert_eq!((spans[1].start_index, spans[1].end_index), (2, 3));
        assert_eq!((spans[2].start_index, spans[2].end_index), (3, 5));
        assert_eq!(spans[2].phrase_idx, 3);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end_index, pair[1].start_index);
        }
    }

    #[test]
    fn span_concatenation_matches_synthesis_text() {
        let phrases = vec![
            phrase("今天"),
            phrase("天气"),
            phrase("\n"),
            phrase("很好"),
            phrase("。"),
        ];
        let spans = build_span_index(&phrases);
        let rebuilt: String = spans
            .iter()
            .map(|s| phrases[s.phrase_idx].text.as_str())
            .collect();
        let submitted = synthesis_text(&phrases);
        assert_eq!(rebuilt, submitted);
        let total_chars: usize = submitted.chars().count();
        assert_eq!(spans.last().unwrap().end_index, total_chars);
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let phrases = vec![phrase("中文"), phrase("abc")];
        let spans = build_span_index(&phrases);
        assert_eq!(spans[0].end_index, 2);
        assert_eq!(spans[1].end_index, 5);
    }

    #[test]
    fn empty_and_line_break_phrases_produce_no_spans() {
        let phrases = vec![phrase(""), phrase("\r\n"), phrase("\n")];
        assert!(build_span_index(&phrases).is_empty());
        assert_eq!(synthesis_text(&phrases), "");
    }
}
