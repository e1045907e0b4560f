// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;
use smallvec::SmallVec;

use crate::model::Span;

/// A located occurrence of a word or phrase in a text snapshot. Ephemeral —
/// it exists only within one reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    span: Span,
    matched_text: String,
}

impl Match {
    pub fn span(&self) -> Span {
        self.span
    }

    /// The exact substring matched, preserving the casing found in the text.
    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }
}

/// A phrase rarely occurs more than once or twice near its hint.
pub type Matches = SmallVec<[Match; 4]>;

/// Find every word-boundary-respecting occurrence of `word` in `text`,
/// case-insensitively, ordered by ascending distance of the match start from
/// `hint_start` (a character offset), ties broken by ascending start.
///
/// An empty result means "cannot relocate" — callers must not fall back to
/// looser matching, since that is how unrelated text gets corrupted.
pub fn locate(text: &str, word: &str, hint_start: usize) -> Matches {
    let mut matches = Matches::new();
    if word.is_empty() || text.is_empty() {
        return matches;
    }

    // Literal search: the needle is escaped, only casing is folded.
    let Ok(regex) = RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
    else {
        // Unreachable for an escaped literal; an empty result keeps the
        // function total.
        return matches;
    };

    for hit in regex.find_iter(text) {
        if !bounded_by_word_edges(text, hit.start(), hit.end()) {
            continue;
        }
        let start = char_offset_at(text, hit.start());
        let end = start + hit.as_str().chars().count();
        matches.push(Match {
            span: Span::new(start, end),
            matched_text: hit.as_str().to_owned(),
        });
    }

    matches.sort_by_key(|m| (m.span().start().abs_diff(hint_start), m.span().start()));
    matches
}

/// Word boundary: string edge, or an adjacent char that is not alphanumeric
/// or `_`. Keeps "cat" from matching inside "category".
fn bounded_by_word_edges(text: &str, start_byte: usize, end_byte: usize) -> bool {
    let before_ok = text[..start_byte]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end_byte..]
        .chars()
        .next()
        .map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn char_offset_at(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
mod tests {
    use super::locate;
    use crate::model::Span;

    fn starts(text: &str, word: &str, hint: usize) -> Vec<usize> {
        locate(text, word, hint)
            .iter()
            .map(|m| m.span().start())
            .collect()
    }

    #[test]
    fn locate_respects_word_boundaries() {
        // "category" and "cats" both contain "cat", but neither is a
        // boundary-bounded occurrence.
        assert!(locate("category of cats", "cat", 0).is_empty());
        assert_eq!(starts("category of cats", "cats", 0), vec![12]);
    }

    #[test]
    fn locate_is_case_insensitive_but_reports_original_casing() {
        let hits = locate("The THE the", "the", 0);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].matched_text(), "The");
        assert_eq!(hits[0].span(), Span::new(0, 3));
    }

    #[test]
    fn locate_orders_by_distance_to_hint_then_start() {
        // Occurrences at 0, 8 and 16; hint 8 puts 8 first, then the
        // equidistant 0 and 16 with the smaller start winning.
        let text = "word at word at word";
        assert_eq!(starts(text, "word", 8), vec![8, 0, 16]);
        assert_eq!(starts(text, "word", 9), vec![8, 16, 0]);
        assert_eq!(starts(text, "word", 0), vec![0, 8, 16]);
    }

    #[test]
    fn locate_escapes_regex_metacharacters() {
        assert_eq!(starts("is (sic) here", "(sic)", 0), vec![3]);
        assert!(locate("anything", ".*", 0).is_empty());
    }

    #[test]
    fn locate_reports_char_offsets_in_multibyte_text() {
        let hits = locate("über die Brücke", "die", 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span(), Span::new(5, 8));
    }

    #[test]
    fn locate_handles_empty_inputs() {
        assert!(locate("", "word", 0).is_empty());
        assert!(locate("word", "", 0).is_empty());
    }

    #[test]
    fn locate_matches_multi_word_phrases() {
        let hits = locate("he could of done it", "could of", 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].span(), Span::new(3, 11));
    }
}
