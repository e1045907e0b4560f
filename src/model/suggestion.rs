// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::SuggestionId;
use super::span::Span;

/// The kind of correction the model proposed. Issued by the remote side and
/// carried through untouched; the engine never second-guesses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grammar,
    Spelling,
    Style,
    Punctuation,
}

impl Category {
    /// Lenient parse from the wire `type` string. Unknown categories are a
    /// per-suggestion validation failure, not an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "grammar" => Some(Self::Grammar),
            "spelling" => Some(Self::Spelling),
            "style" => Some(Self::Style),
            "punctuation" => Some(Self::Punctuation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Spelling => "spelling",
            Self::Style => "style",
            Self::Punctuation => "punctuation",
        }
    }
}

/// A proposed replacement keyed to the text snapshot that was analyzed.
///
/// The span is advisory: the document may have changed since the model
/// produced it, and the model miscounts offsets anyway. Consumers go through
/// `ops::reconcile` before trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    suggestion_id: SuggestionId,
    category: Category,
    span: Span,
    original: String,
    correction: String,
    explanation: String,
}

impl Suggestion {
    /// The validator is the only producer on the live path and has already
    /// enforced the batch invariants (non-empty original, no-op rejected,
    /// span non-degenerate within the analyzed snapshot).
    pub fn new(
        suggestion_id: SuggestionId,
        category: Category,
        span: Span,
        original: impl Into<String>,
        correction: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            suggestion_id,
            category,
            span,
            original: original.into(),
            correction: correction.into(),
            explanation: explanation.into(),
        }
    }

    pub fn suggestion_id(&self) -> &SuggestionId {
        &self.suggestion_id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn correction(&self) -> &str {
        &self.correction
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// True when `a` and `b` differ only by surrounding whitespace or letter
/// case — "cosmetic drift" that does not invalidate a span.
pub fn cosmetically_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
