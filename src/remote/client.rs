// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::pin::Pin;

use super::types::{AnalysisRequest, RemoteFailure};

/// Future returned by analysis backends.
pub type BoxAnalysisFuture = Pin<Box<dyn Future<Output = Result<String, RemoteFailure>> + Send>>;

/// The black-box remote model call.
///
/// Implementations own transport, auth, and any retries; the engine only
/// sees a request in and a raw response body (or categorized failure) out.
/// The body goes through `parse_response` and the validator before anything
/// in it is believed.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, request: AnalysisRequest) -> BoxAnalysisFuture;
}
