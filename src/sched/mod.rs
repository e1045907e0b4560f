// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Redline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Redline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced trigger for remote analysis.
//!
//! Continuous typing must not turn into a request storm: each text change
//! restarts a quiet-period timer, and only the timer that survives untouched
//! runs the analysis. The store's state machine provides the single-flight
//! and stale-response guarantees; the scheduler only decides *when* to ask.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::remote::client::AnalysisBackend;
use crate::remote::types::parse_response;
use crate::store::SuggestionStore;

pub struct AnalysisScheduler {
    store: Arc<Mutex<SuggestionStore>>,
    backend: Arc<dyn AnalysisBackend>,
    pending: Option<JoinHandle<()>>,
}

impl AnalysisScheduler {
    pub fn new(store: Arc<Mutex<SuggestionStore>>, backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            store,
            backend,
            pending: None,
        }
    }

    pub fn store(&self) -> Arc<Mutex<SuggestionStore>> {
        Arc::clone(&self.store)
    }

    /// Restart the quiet-period timer for the current text.
    ///
    /// The change tick runs immediately (stale detection and cleanup); the
    /// analysis attempt runs only after the debounce elapses without another
    /// call aborting it. Responses for snapshots the store has moved past
    /// are discarded inside `finish_analysis`.
    pub fn text_changed(&mut self, text: String) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let store = Arc::clone(&self.store);
        let backend = Arc::clone(&self.backend);
        self.pending = Some(tokio::spawn(async move {
            let debounce = {
                let mut store = store.lock().await;
                store.note_text_changed(&text);
                store.config().debounce
            };

            tokio::time::sleep(debounce).await;

            let request = {
                let mut store = store.lock().await;
                // Second tick: a set that went stale above is cleared now,
                // so a single edit burst can still restart analysis.
                store.note_text_changed(&text);
                store.begin_analysis(&text)
            };
            let Some(request) = request else {
                return;
            };

            // Detached: once the request is in flight it runs to completion.
            // A later edit must not strand the store in `Analyzing` by
            // killing the task mid-call; stale responses are discarded by
            // snapshot comparison inside `finish_analysis` instead.
            tokio::spawn(async move {
                let outcome = match backend.analyze(request).await {
                    Ok(body) => parse_response(&body),
                    Err(failure) => Err(failure),
                };

                let mut store = store.lock().await;
                store.finish_analysis(&text, outcome);
            });
        }));
    }

    /// Whether a debounce timer is still counting down. Does not cover an
    /// in-flight backend call: those detach, and the store's `Analyzing`
    /// state is the source of truth for them.
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Mutex;

    use crate::remote::client::{AnalysisBackend, BoxAnalysisFuture};
    use crate::remote::types::{AnalysisRequest, RemoteFailure};
    use crate::store::{AnalysisState, EngineConfig, SuggestionStore};

    use super::AnalysisScheduler;

    const TEXT: &str = "the qick fox and teh cat run far";

    struct ScriptedBackend {
        calls: AtomicUsize,
        body: String,
        delay: Duration,
    }

    impl ScriptedBackend {
        fn new(body: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                body: body.to_owned(),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(body: &str, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(body)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AnalysisBackend for ScriptedBackend {
        fn analyze(&self, _request: AnalysisRequest) -> BoxAnalysisFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = self.body.clone();
            let delay = self.delay;
            Box::pin(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(body)
            })
        }
    }

    struct FailingBackend;

    impl AnalysisBackend for FailingBackend {
        fn analyze(&self, _request: AnalysisRequest) -> BoxAnalysisFuture {
            Box::pin(async {
                Err(RemoteFailure::Transient {
                    message: "connection reset".to_owned(),
                })
            })
        }
    }

    fn test_config() -> EngineConfig {
        EngineConfig {
            min_analysis_chars: 5,
            min_analysis_words: 2,
            stale_word_tolerance: 3,
            debounce: Duration::from_millis(20),
        }
    }

    fn suggestion_body() -> String {
        r#"[
            {
                "type": "spelling",
                "position": { "start": 4, "end": 8 },
                "original": "qick",
                "correction": "quick",
                "explanation": "misspelling"
            }
        ]"#
        .to_owned()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn debounce_collapses_rapid_edits_into_one_call() {
        let store = Arc::new(Mutex::new(SuggestionStore::new(test_config())));
        let backend = Arc::new(ScriptedBackend::new(&suggestion_body()));
        let mut scheduler = AnalysisScheduler::new(Arc::clone(&store), backend.clone());

        scheduler.text_changed("the qick".to_owned());
        scheduler.text_changed("the qick fox and".to_owned());
        scheduler.text_changed(TEXT.to_owned());
        assert!(scheduler.has_pending());
        settle().await;

        assert_eq!(backend.calls(), 1);
        assert!(!scheduler.has_pending());
        let store = store.lock().await;
        assert_eq!(store.state(), AnalysisState::Completed);
        assert_eq!(store.suggestions().len(), 1);
        assert_eq!(store.suggestions()[0].original(), "qick");
    }

    #[tokio::test]
    async fn below_threshold_text_never_calls_the_backend() {
        let store = Arc::new(Mutex::new(SuggestionStore::new(test_config())));
        let backend = Arc::new(ScriptedBackend::new(&suggestion_body()));
        let mut scheduler = AnalysisScheduler::new(Arc::clone(&store), backend.clone());

        scheduler.text_changed("hi".to_owned());
        settle().await;

        assert_eq!(backend.calls(), 0);
        assert_eq!(store.lock().await.state(), AnalysisState::Idle);
    }

    #[tokio::test]
    async fn a_response_landing_after_heavy_edits_is_discarded() {
        let store = Arc::new(Mutex::new(SuggestionStore::new(test_config())));
        let backend = Arc::new(ScriptedBackend::with_delay(
            &suggestion_body(),
            Duration::from_millis(40),
        ));
        let mut scheduler = AnalysisScheduler::new(Arc::clone(&store), backend.clone());

        scheduler.text_changed(TEXT.to_owned());
        // Let the debounce fire and the backend call start.
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(backend.calls(), 1);
        // The debounce handle is done; the in-flight call shows up as
        // `Analyzing` on the store, not as a pending timer.
        assert!(!scheduler.has_pending());
        assert_eq!(store.lock().await.state(), AnalysisState::Analyzing);

        // The document shrinks far past the word tolerance while the
        // response is still in flight; "tiny" is also below the analysis
        // thresholds, so no second request goes out.
        scheduler.text_changed("tiny".to_owned());
        settle().await;

        let store = store.lock().await;
        assert_eq!(backend.calls(), 1);
        assert_eq!(store.state(), AnalysisState::Idle);
        assert!(store.suggestions().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_returns_the_store_to_idle() {
        let store = Arc::new(Mutex::new(SuggestionStore::new(test_config())));
        let mut scheduler = AnalysisScheduler::new(Arc::clone(&store), Arc::new(FailingBackend));

        scheduler.text_changed(TEXT.to_owned());
        settle().await;

        let store = store.lock().await;
        assert_eq!(store.state(), AnalysisState::Idle);
        assert!(store.suggestions().is_empty());
    }

    #[tokio::test]
    async fn error_bodies_degrade_to_a_cleared_idle_store() {
        let store = Arc::new(Mutex::new(SuggestionStore::new(test_config())));
        let backend = Arc::new(ScriptedBackend::new(r#"{"error": "rate limit exceeded"}"#));
        let mut scheduler = AnalysisScheduler::new(Arc::clone(&store), backend.clone());

        scheduler.text_changed(TEXT.to_owned());
        settle().await;

        assert_eq!(backend.calls(), 1);
        let store = store.lock().await;
        assert_eq!(store.state(), AnalysisState::Idle);
        assert!(store.suggestions().is_empty());
    }
}
