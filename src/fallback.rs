//! Local best-effort segmentation for when the backend is unreachable.
//!
//! Demo mode only: CJK runs are split into single-character phrases with
//! placeholder annotations, everything else passes through untouched. The
//! concatenation of the produced phrase texts equals the input exactly, so
//! span indexing still works.

use crate::segment::Phrase;

pub const PLACEHOLDER_PINYIN: &str = "[offline]";
pub const PLACEHOLDER_DEFINITION: &str = "[offline - backend unavailable]";

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

fn phrase(text: String, annotated: bool) -> Phrase {
    Phrase {
        text,
        pinyin: if annotated {
            PLACEHOLDER_PINYIN.to_string()
        } else {
            String::new()
        },
        definition: if annotated {
            PLACEHOLDER_DEFINITION.to_string()
        } else {
            String::new()
        },
        all_entries: Vec::new(),
    }
}

/// Character-class segmentation: one phrase per CJK ideograph, one per
/// line break, and one per run of anything else.
pub fn segment_by_character_class(text: &str) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    let mut other = String::new();
    for c in text.chars() {
        if is_cjk(c) || c == '\n' {
            if !other.is_empty() {
                phrases.push(phrase(std::mem::take(&mut other), false));
            }
            phrases.push(phrase(c.to_string(), is_cjk(c)));
        } else {
            other.push(c);
        }
    }
    if !other.is_empty() {
        phrases.push(phrase(other, false));
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_input_exactly() {
        let input = "你好, world!\n再见。";
        let phrases = segment_by_character_class(input);
        let rebuilt: String = phrases.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn cjk_characters_get_placeholder_annotations() {
        let phrases = segment_by_character_class("好a");
        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].pinyin, PLACEHOLDER_PINYIN);
        assert!(phrases[1].pinyin.is_empty());
    }

    #[test]
    fn line_breaks_become_separate_unannotated_phrases() {
        let phrases = segment_by_character_class("你\n好");
        assert_eq!(phrases.len(), 3);
        assert!(phrases[1].is_line_break());
        assert!(phrases[1].pinyin.is_empty());
    }

    #[test]
    fn empty_input_yields_no_phrases() {
        assert!(segment_by_character_class("").is_empty());
    }
}
