// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::suggestion::cosmetically_equal;
use crate::model::{Category, Span, Suggestion, SuggestionId};

use super::types::RawSuggestion;

/// Monotonic source of suggestion ids. Owned by the store, so ids are
/// assigned when a batch enters it — the remote side never names
/// suggestions.
#[derive(Debug, Default)]
pub struct SuggestionIdSeq {
    next: u64,
}

impl SuggestionIdSeq {
    pub fn next_id(&mut self) -> SuggestionId {
        self.next += 1;
        SuggestionId::new_unchecked(format!("s:{}", self.next))
    }
}

/// Filter a raw remote batch down to well-formed, non-degenerate,
/// de-duplicated suggestions, sorted ascending by start.
///
/// `text_char_len` is the character length of the snapshot that was
/// analyzed. Offsets outside `[0, text_char_len]` are clamped, then the span
/// is re-checked for `start < end`. Never errors: a batch where everything
/// is malformed simply comes back empty, and re-running the validator over
/// its own output changes nothing.
pub fn validate(
    raw: &[RawSuggestion],
    text_char_len: usize,
    ids: &mut SuggestionIdSeq,
) -> Vec<Suggestion> {
    let mut seen: HashSet<(usize, usize, String)> = HashSet::new();
    let mut kept = Vec::new();

    for candidate in raw {
        let Some(category) = candidate.kind.as_deref().and_then(Category::parse) else {
            continue;
        };
        let Some(position) = candidate.position else {
            continue;
        };
        let (Some(raw_start), Some(raw_end)) = (position.start, position.end) else {
            continue;
        };
        let Some(original) = non_empty(&candidate.original) else {
            continue;
        };
        let Some(correction) = non_empty(&candidate.correction) else {
            continue;
        };
        let Some(explanation) = non_empty(&candidate.explanation) else {
            continue;
        };

        let span = Span::new(
            clamp_offset(raw_start, text_char_len),
            clamp_offset(raw_end, text_char_len),
        );
        if span.is_empty() {
            continue;
        }
        if cosmetically_equal(original, correction) {
            continue;
        }
        if !seen.insert((span.start(), span.end(), original.to_owned())) {
            continue;
        }

        kept.push(Suggestion::new(
            ids.next_id(),
            category,
            span,
            original,
            correction,
            explanation,
        ));
    }

    kept.sort_by_key(|s| (s.span().start(), s.span().end()));
    kept
}

/// Keeps the field's exact value but rejects missing or blank strings.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

fn clamp_offset(offset: i64, char_len: usize) -> usize {
    if offset <= 0 {
        return 0;
    }
    usize::try_from(offset).map_or(char_len, |value| value.min(char_len))
}
