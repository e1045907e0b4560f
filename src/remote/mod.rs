// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire boundary to the remote analysis model.
//!
//! Everything arriving over this boundary is untrusted: fields go missing,
//! offsets are miscounted, batches carry duplicates, and error bodies come
//! in several shapes. `parse_response` and `validate` are the defense layer;
//! malformed input degrades to an empty batch plus a categorized failure
//! notice, never a crash.

pub mod client;
pub mod types;
pub mod validate;

pub use client::{AnalysisBackend, BoxAnalysisFuture};
pub use types::{
    parse_response, AnalysisRequest, RawPosition, RawSuggestion, RemoteFailure, SuggestionRecord,
};
pub use validate::{validate, SuggestionIdSeq};
