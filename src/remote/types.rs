// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Category, DocumentId, Suggestion};

/// Request sent to the analysis model. Ids travel as plain camelCase-keyed
/// strings on the wire; the engine types them at its own boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub text: String,
    pub document_id: Option<String>,
    pub user_id: Option<String>,
}

/// Raw span as the model reports it. Signed, because models have been seen
/// emitting negative offsets; the validator clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawPosition {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// One element of the model's response array, before validation. Every field
/// is optional so a single malformed element never sinks the batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSuggestion {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub position: Option<RawPosition>,
    pub original: Option<String>,
    pub correction: Option<String>,
    pub explanation: Option<String>,
}

/// Categorized failure from the remote analysis call or its response body.
/// The category drives which notice the editor surface shows; none of these
/// are fatal and none retry automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Wrong or missing credentials/config; retrying without operator
    /// action will not help.
    Configuration { message: String },
    /// Rate limits, quota, timeouts, connectivity; the next qualifying text
    /// change retries naturally.
    Transient { message: String },
    /// Anything else, including unparseable response bodies.
    Failed { message: String },
}

impl RemoteFailure {
    /// Sort an error message into a category by its wording. The remote side
    /// does not send machine-readable codes, so wording is all there is.
    pub fn categorize(message: impl Into<String>) -> Self {
        const CONFIGURATION: &[&str] = &[
            "api key",
            "unauthorized",
            "forbidden",
            "credential",
            "configuration",
            "not configured",
        ];
        const TRANSIENT: &[&str] = &[
            "rate limit",
            "quota",
            "timeout",
            "timed out",
            "overloaded",
            "unavailable",
            "connection",
            "network",
        ];

        let message = message.into();
        let lowered = message.to_lowercase();
        if CONFIGURATION.iter().any(|needle| lowered.contains(needle)) {
            Self::Configuration { message }
        } else if TRANSIENT.iter().any(|needle| lowered.contains(needle)) {
            Self::Transient { message }
        } else {
            Self::Failed { message }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Configuration { message }
            | Self::Transient { message }
            | Self::Failed { message } => message,
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "analysis configuration error: {message}"),
            Self::Transient { message } => write!(f, "analysis temporarily failed: {message}"),
            Self::Failed { message } => write!(f, "analysis failed: {message}"),
        }
    }
}

impl std::error::Error for RemoteFailure {}

/// Parse a raw response body into a batch of raw suggestions.
///
/// A JSON array yields a batch (elements that do not deserialize are
/// dropped); `{ "error": ... }` objects and everything else degrade to a
/// categorized failure. Total — invalid JSON is a `Failed`, not a panic.
pub fn parse_response(body: &str) -> Result<Vec<RawSuggestion>, RemoteFailure> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            return Err(RemoteFailure::Failed {
                message: format!("invalid analysis response: {err}"),
            })
        }
    };

    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<RawSuggestion>(item).ok())
            .collect()),
        serde_json::Value::Object(map) => {
            let message = match map.get("error") {
                Some(serde_json::Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
                None => "analysis response was not a suggestion list".to_owned(),
            };
            Err(RemoteFailure::categorize(message))
        }
        _ => Err(RemoteFailure::Failed {
            message: "analysis response was not a suggestion list".to_owned(),
        }),
    }
}

/// Persisted mirror of a suggestion, keyed to the owning document and the
/// analyzed snapshot. Storage itself lives outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub suggestion_id: String,
    pub document_id: String,
    pub snapshot_id: String,
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub correction: String,
    pub explanation: String,
}

impl SuggestionRecord {
    pub fn from_suggestion(
        suggestion: &Suggestion,
        document_id: &DocumentId,
        snapshot_id: impl Into<String>,
    ) -> Self {
        Self {
            suggestion_id: suggestion.suggestion_id().as_str().to_owned(),
            document_id: document_id.as_str().to_owned(),
            snapshot_id: snapshot_id.into(),
            category: suggestion.category(),
            start: suggestion.span().start(),
            end: suggestion.span().end(),
            original: suggestion.original().to_owned(),
            correction: suggestion.correction().to_owned(),
            explanation: suggestion.explanation().to_owned(),
        }
    }
}
