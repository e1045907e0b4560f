// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: ids, spans, suggestions.
//!
//! Spans are advisory across the whole engine — they index into the text
//! snapshot that was analyzed, not into whatever the document looks like now.

pub mod ids;
pub mod span;
pub mod suggestion;

pub use ids::{DocumentId, Id, IdError, SuggestionId, UserId};
pub use span::Span;
pub use suggestion::{Category, Suggestion};
