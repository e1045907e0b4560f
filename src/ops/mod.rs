// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reconciliation and application of suggestions against live text.
//!
//! Suggestion spans index the snapshot that was analyzed, not the text being
//! edited now. Every application therefore reconciles the span first: exact
//! slice match, then cosmetic-drift equality, then word-boundary relocation
//! near the hinted offset. When all three fail the engine reports `NotFound`
//! and leaves the text alone — it never splices text it cannot verify.

use std::fmt;

use crate::model::suggestion::cosmetically_equal;
use crate::model::{Span, Suggestion, SuggestionId};
use crate::query::locate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// The expected phrase no longer occurs anywhere in the text: edited
    /// away, already corrected, or hallucinated by the model. Recoverable;
    /// callers surface a notice and leave the document untouched.
    NotFound { original: String },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { original } => {
                write!(f, "text no longer contains '{original}'")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}

/// Decide whether a suggestion's stated span can be trusted against `text`,
/// or recover the real span when offsets have drifted.
///
/// An out-of-bounds span is not an error here; it simply fails the slice
/// checks and goes straight to relocation.
pub fn reconcile(text: &str, suggestion: &Suggestion) -> Result<Span, ReconcileError> {
    let span = suggestion.span();
    if let Some(actual) = span.slice(text) {
        if actual == suggestion.original() || cosmetically_equal(actual, suggestion.original()) {
            return Ok(span);
        }
    }
    let matches = locate(text, suggestion.original(), span.start());
    match matches.first() {
        Some(closest) => Ok(closest.span()),
        None => Err(ReconcileError::NotFound {
            original: suggestion.original().to_owned(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub new_text: String,
    /// Char offset just past the inserted correction; where the caret goes.
    pub new_cursor: usize,
    /// The span that was actually replaced, after reconciliation.
    pub resolved: Span,
}

/// Reconcile one suggestion and splice its correction into `text`.
pub fn apply_one(text: &str, suggestion: &Suggestion) -> Result<AppliedEdit, ReconcileError> {
    let resolved = reconcile(text, suggestion)?;
    let Some(new_text) = resolved.splice(text, suggestion.correction()) else {
        // A span that cannot be spliced despite reconciling counts as
        // unlocatable, never as a panic.
        return Err(ReconcileError::NotFound {
            original: suggestion.original().to_owned(),
        });
    };
    let new_cursor = resolved.start() + suggestion.correction().chars().count();
    Ok(AppliedEdit {
        new_text,
        new_cursor,
        resolved,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub new_text: String,
    pub applied: usize,
    /// Suggestions that could not be applied (unlocatable or conflicting).
    pub skipped: Vec<SuggestionId>,
}

impl BatchOutcome {
    /// A non-empty batch where nothing applied means the whole set went
    /// stale; callers should prompt for re-analysis instead of reporting
    /// success.
    pub fn is_stale_batch(&self) -> bool {
        self.applied == 0 && !self.skipped.is_empty()
    }
}

/// Apply a batch of suggestions to `text` without later splices invalidating
/// earlier offsets.
///
/// Suggestions are processed in descending order of their stated start, so
/// each splice only touches text to the right of everything still pending.
/// Each one is re-reconciled against the progressively mutated text.
/// Overlaps after relocation resolve first-applied-wins: a resolved span
/// reaching into an already-spliced region is skipped.
pub fn apply_all(text: &str, suggestions: &[Suggestion]) -> BatchOutcome {
    let mut ordered: Vec<&Suggestion> = suggestions.iter().collect();
    ordered.sort_by(|a, b| {
        b.span()
            .start()
            .cmp(&a.span().start())
            .then_with(|| b.span().end().cmp(&a.span().end()))
    });

    let mut new_text = text.to_owned();
    let mut applied = 0usize;
    let mut skipped = Vec::new();
    // Smallest start already spliced; nothing may reach at or past it.
    let mut frontier = usize::MAX;

    for suggestion in ordered {
        let resolved = match reconcile(&new_text, suggestion) {
            Ok(span) => span,
            Err(ReconcileError::NotFound { .. }) => {
                skipped.push(suggestion.suggestion_id().clone());
                continue;
            }
        };
        if resolved.end() > frontier {
            skipped.push(suggestion.suggestion_id().clone());
            continue;
        }
        let Some(spliced) = resolved.splice(&new_text, suggestion.correction()) else {
            skipped.push(suggestion.suggestion_id().clone());
            continue;
        };
        new_text = spliced;
        frontier = resolved.start();
        applied += 1;
    }

    BatchOutcome {
        new_text,
        applied,
        skipped,
    }
}
