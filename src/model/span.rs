// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::ops::Range;

/// Half-open character-offset interval `[start, end)` into one text snapshot.
///
/// Offsets count characters, not bytes. The remote side counts characters,
/// and slicing UTF-8 at an arbitrary wire offset must never panic — every
/// accessor here converts to byte offsets internally and returns `None`
/// instead of reaching past the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Constructs without validation; degenerate spans (`end <= start`) are
    /// representable and simply fail every slice/splice.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The substring this span covers in `text`, or `None` when the span is
    /// degenerate or out of bounds.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let range = self.byte_range(text)?;
        text.get(range)
    }

    /// `text` with this span replaced by `replacement`, or `None` when the
    /// span is degenerate or out of bounds. The input is never mutated.
    pub fn splice(&self, text: &str, replacement: &str) -> Option<String> {
        let range = self.byte_range(text)?;
        let mut out =
            String::with_capacity(text.len() - (range.end - range.start) + replacement.len());
        out.push_str(&text[..range.start]);
        out.push_str(replacement);
        out.push_str(&text[range.end..]);
        Some(out)
    }

    fn byte_range(&self, text: &str) -> Option<Range<usize>> {
        if self.end <= self.start {
            return None;
        }
        let start = char_to_byte(text, self.start)?;
        let end = char_to_byte(text, self.end)?;
        Some(start..end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Byte offset of the `char_offset`-th character, `Some(text.len())` for the
/// one-past-the-end position, `None` beyond that.
fn char_to_byte(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte_idx, _)| byte_idx)
        .chain(std::iter::once(text.len()))
        .nth(char_offset)
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn slice_uses_char_offsets_in_multibyte_text() {
        let text = "héllo wörld";
        assert_eq!(Span::new(6, 11).slice(text), Some("wörld"));
        assert_eq!(Span::new(0, 5).slice(text), Some("héllo"));
    }

    #[test]
    fn slice_rejects_out_of_bounds_and_degenerate_spans() {
        assert_eq!(Span::new(0, 99).slice("short"), None);
        assert_eq!(Span::new(3, 3).slice("short"), None);
        assert_eq!(Span::new(4, 2).slice("short"), None);
    }

    #[test]
    fn splice_replaces_only_the_span() {
        let out = Span::new(4, 8).splice("The qick fox", "quick").expect("splice");
        assert_eq!(out, "The quick fox");
    }

    #[test]
    fn splice_handles_multibyte_neighbours() {
        let out = Span::new(2, 3).splice("ä b ö", "beta").expect("splice");
        assert_eq!(out, "ä beta ö");
    }

    #[test]
    fn splice_out_of_bounds_is_none() {
        assert_eq!(Span::new(3, 10).splice("ab", "x"), None);
    }

    #[test]
    fn degenerate_spans_report_empty() {
        assert!(Span::new(3, 3).is_empty());
        assert!(Span::new(4, 2).is_empty());
        assert!(!Span::new(2, 4).is_empty());
        assert_eq!(Span::new(2, 4).len(), 2);
        assert_eq!(Span::new(4, 2).len(), 0);
    }
}
