// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Owned state for the suggestion set and analysis freshness.
//!
//! The store is a plain owned-state object with synchronous methods; the
//! cooperative single-threaded embedding provides ordering, and the only
//! guard beyond that is the applying flag, which keeps a second acceptance
//! gesture (or an analysis response landing mid-application) from
//! interleaving with a batch that is still rewriting text.

use std::time::Duration;

use crate::model::{DocumentId, Suggestion, SuggestionId, UserId};
use crate::ops::{apply_all, apply_one, ReconcileError};
use crate::remote::types::{AnalysisRequest, RawSuggestion, RemoteFailure};
use crate::remote::validate::{validate, SuggestionIdSeq};

/// Tuning knobs for analysis triggering and staleness detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum character count before a text qualifies for analysis.
    pub min_analysis_chars: usize,
    /// Minimum word count before a text qualifies for analysis.
    pub min_analysis_words: usize,
    /// How far the live word count may drift from the analyzed word count
    /// before the suggestion set is declared stale.
    pub stale_word_tolerance: usize,
    /// Quiet period after the last edit before analysis fires.
    pub debounce: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_analysis_chars: 20,
            min_analysis_words: 5,
            stale_word_tolerance: 3,
            debounce: Duration::from_millis(1200),
        }
    }
}

/// Freshness of the current suggestion set relative to the live text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisState {
    /// No analysis in flight and no claim about the current text.
    #[default]
    Idle,
    /// A request is in flight for the snapshot recorded by the store.
    Analyzing,
    /// The suggestion set matches the last analyzed snapshot closely enough.
    Completed,
    /// The text drifted past tolerance (or an application rewrote it);
    /// suggestions are discarded on the next change tick.
    Stale,
}

/// What landing an analysis response did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Batch validated and installed; `suggestions` may be zero (a clean
    /// text is still a completed analysis).
    Completed { suggestions: usize },
    /// Remote failure; the suggestion set was cleared and the machine went
    /// back to `Idle`. Surface the failure's category to the user.
    Failed(RemoteFailure),
    /// Response arrived for a snapshot the store has moved past, or while an
    /// application was in progress. Nothing was merged.
    Discarded,
}

/// Result of accepting a single suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The correction was spliced in; the caret goes to `new_cursor`.
    Applied { new_text: String, new_cursor: usize },
    /// The expected phrase no longer exists; the text is untouched and the
    /// suggestion has been discarded.
    NotFound,
    /// Another acceptance gesture is still processing.
    Busy,
    /// Unknown suggestion id (already removed or never stored).
    UnknownSuggestion,
}

/// Result of accepting the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptAllOutcome {
    Applied {
        new_text: String,
        applied: usize,
        skipped: usize,
    },
    /// Non-empty set, nothing applied: the set was stale; prompt for
    /// re-analysis.
    StaleBatch,
    Busy,
    /// There was nothing to apply.
    Empty,
}

#[derive(Debug, Default)]
pub struct SuggestionStore {
    config: EngineConfig,
    suggestions: Vec<Suggestion>,
    ids: SuggestionIdSeq,
    state: AnalysisState,
    /// Snapshot captured at `begin_analysis`; responses must match it.
    analyzed_text: Option<String>,
    analyzed_word_count: usize,
    applying: bool,
    document_id: Option<DocumentId>,
    user_id: Option<UserId>,
}

impl SuggestionStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_identity(
        config: EngineConfig,
        document_id: Option<DocumentId>,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            config,
            document_id,
            user_id,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Whether an analysis has completed for (a close enough version of)
    /// the current text.
    pub fn analysis_completed(&self) -> bool {
        self.state == AnalysisState::Completed
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// The editor surface may hold the applying flag across its own async
    /// gaps around an acceptance gesture; while set, acceptance re-entry
    /// reports `Busy` and landing analysis responses are discarded.
    pub fn set_applying(&mut self, applying: bool) {
        self.applying = applying;
    }

    /// Record an edit tick.
    ///
    /// A stale set is cleared here and the machine returns to `Idle`, so the
    /// next quiet period can restart analysis. A live set goes stale when
    /// the word count drifts past tolerance or an application is rewriting
    /// the text.
    pub fn note_text_changed(&mut self, text: &str) {
        match self.state {
            AnalysisState::Stale => {
                self.suggestions.clear();
                self.analyzed_text = None;
                self.state = AnalysisState::Idle;
            }
            AnalysisState::Completed | AnalysisState::Analyzing => {
                let drift = word_count(text).abs_diff(self.analyzed_word_count);
                if drift > self.config.stale_word_tolerance || self.applying {
                    self.state = AnalysisState::Stale;
                }
            }
            AnalysisState::Idle => {}
        }
    }

    /// Gate an analysis attempt for `text`.
    ///
    /// Returns the request to send, or `None` when the text is below the
    /// thresholds, an analysis is already in flight, or the current set is
    /// still fresh. Single-flight: a second call before `finish_analysis`
    /// always returns `None`.
    pub fn begin_analysis(&mut self, text: &str) -> Option<AnalysisRequest> {
        if self.state != AnalysisState::Idle {
            return None;
        }
        if text.chars().count() < self.config.min_analysis_chars {
            return None;
        }
        let words = word_count(text);
        if words < self.config.min_analysis_words {
            return None;
        }

        self.state = AnalysisState::Analyzing;
        self.analyzed_text = Some(text.to_owned());
        self.analyzed_word_count = words;
        Some(AnalysisRequest {
            text: text.to_owned(),
            document_id: self.document_id.as_ref().map(|id| id.as_str().to_owned()),
            user_id: self.user_id.as_ref().map(|id| id.as_str().to_owned()),
        })
    }

    /// Land an analysis response for the snapshot captured at
    /// `begin_analysis` time.
    ///
    /// The response is discarded when an application is in progress, when
    /// the machine has left `Analyzing` (stale, cleared), or when the
    /// snapshot no longer matches — a late response must never be merged
    /// into text it was not computed for.
    pub fn finish_analysis(
        &mut self,
        snapshot_text: &str,
        outcome: Result<Vec<RawSuggestion>, RemoteFailure>,
    ) -> AnalysisOutcome {
        if self.applying {
            return AnalysisOutcome::Discarded;
        }
        if self.state != AnalysisState::Analyzing {
            return AnalysisOutcome::Discarded;
        }
        if self.analyzed_text.as_deref() != Some(snapshot_text) {
            return AnalysisOutcome::Discarded;
        }

        match outcome {
            Ok(raw) => {
                let count = self.add_batch(&raw, snapshot_text);
                AnalysisOutcome::Completed { suggestions: count }
            }
            Err(failure) => {
                self.suggestions.clear();
                self.analyzed_text = None;
                self.state = AnalysisState::Idle;
                AnalysisOutcome::Failed(failure)
            }
        }
    }

    /// Validate a raw batch against `text` and replace the current set,
    /// superseding whatever was there. Returns how many survived.
    pub fn add_batch(&mut self, raw: &[RawSuggestion], text: &str) -> usize {
        let batch = validate(raw, text.chars().count(), &mut self.ids);
        let count = batch.len();
        self.suggestions = batch;
        self.analyzed_text = Some(text.to_owned());
        self.analyzed_word_count = word_count(text);
        self.state = AnalysisState::Completed;
        count
    }

    /// Remove one suggestion (user rejected it). Returns whether it existed.
    pub fn remove(&mut self, suggestion_id: &SuggestionId) -> bool {
        let before = self.suggestions.len();
        self.suggestions
            .retain(|s| s.suggestion_id() != suggestion_id);
        self.suggestions.len() != before
    }

    /// Drop the whole set and any freshness claim.
    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.analyzed_text = None;
        self.state = AnalysisState::Idle;
    }

    /// Accept a single suggestion against `text`. The suggestion is
    /// consumed — removed from the set — whether it applied or turned out
    /// unlocatable.
    pub fn accept_one(&mut self, text: &str, suggestion_id: &SuggestionId) -> AcceptOutcome {
        if self.applying {
            return AcceptOutcome::Busy;
        }
        let Some(suggestion) = self
            .suggestions
            .iter()
            .find(|s| s.suggestion_id() == suggestion_id)
            .cloned()
        else {
            return AcceptOutcome::UnknownSuggestion;
        };

        self.applying = true;
        let outcome = match apply_one(text, &suggestion) {
            Ok(edit) => AcceptOutcome::Applied {
                new_text: edit.new_text,
                new_cursor: edit.new_cursor,
            },
            Err(ReconcileError::NotFound { .. }) => AcceptOutcome::NotFound,
        };
        self.suggestions
            .retain(|s| s.suggestion_id() != suggestion_id);
        self.applying = false;
        outcome
    }

    /// Accept every remaining suggestion against `text`. Consumes the set
    /// and marks the machine stale — the text just changed wholesale, so
    /// the next tick restarts the cycle.
    pub fn accept_all(&mut self, text: &str) -> AcceptAllOutcome {
        if self.applying {
            return AcceptAllOutcome::Busy;
        }
        if self.suggestions.is_empty() {
            return AcceptAllOutcome::Empty;
        }

        self.applying = true;
        let outcome = apply_all(text, &self.suggestions);
        self.suggestions.clear();
        self.applying = false;
        self.state = AnalysisState::Stale;

        if outcome.is_stale_batch() {
            return AcceptAllOutcome::StaleBatch;
        }
        AcceptAllOutcome::Applied {
            new_text: outcome.new_text,
            applied: outcome.applied,
            skipped: outcome.skipped.len(),
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
