// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Redline — suggestion reconciliation engine for an AI writing assistant.
//!
//! The editor surface sends document text to a language model and gets back
//! proposed corrections whose offsets are frequently stale: the model
//! miscounts characters and the user keeps typing while the request is in
//! flight. This crate turns those proposals into safe, deterministic text
//! replacements. It locates phrases (`query`), filters raw remote batches
//! (`remote`), reconciles drifted spans and splices corrections (`ops`), and
//! tracks analysis freshness behind a debounced trigger (`store`, `sched`).
//!
//! The editing surface, persistence, and the model transport stay outside;
//! the engine only ever sees text by value and hands back new text plus a
//! cursor offset.

pub mod model;
pub mod ops;
pub mod query;
pub mod remote;
pub mod sched;
pub mod store;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
