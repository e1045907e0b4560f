// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a text snapshot.
//!
//! Queries are pure: they receive the text by value for the duration of one
//! call and retain nothing.

pub mod locate;

pub use locate::{locate, Match, Matches};
