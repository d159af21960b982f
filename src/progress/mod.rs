//! Debounced progress indicator signal.
//!
//! Long-running flows show a progress message while network calls are in
//! flight. The UI layer animates its indicator in and out, so replacing a
//! visible message must be sequenced: dismiss, wait for the exit
//! animation to settle, show the new message, then wait again before
//! handing control back — otherwise chained progress-gated calls produce
//! visibly overlapping indicators. Callers observe the current state
//! through a watch channel carrying `Option<String>`.

use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::time::sleep;

const DEFAULT_DISMISS_SETTLE: Duration = Duration::from_millis(500);
const DEFAULT_SHOW_SETTLE: Duration = Duration::from_millis(100);

/// Coalescing show/dismiss signal with two settle intervals.
pub struct ProgressSignal {
    // Serializes whole show/dismiss cycles so they never interleave.
    gate: Mutex<()>,
    tx: watch::Sender<Option<String>>,
    dismiss_settle: Duration,
    show_settle: Duration,
}

impl ProgressSignal {
    pub fn new() -> Self {
        Self::with_settle(DEFAULT_DISMISS_SETTLE, DEFAULT_SHOW_SETTLE)
    }

    /// Build with explicit settle intervals (tests and embedders with
    /// different animation timings).
    pub fn with_settle(dismiss_settle: Duration, show_settle: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            gate: Mutex::new(()),
            tx,
            dismiss_settle,
            show_settle,
        }
    }

    /// Observe progress-state changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    pub fn is_shown(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Show a progress message.
    ///
    /// If a message is already visible this runs one full
    /// dismiss-settle-show-settle cycle; the call returns only after the
    /// second settle, so a network call issued right after cannot race the
    /// indicator's entrance animation.
    pub async fn show(&self, message: impl Into<String>) {
        let _cycle = self.gate.lock().await;

        if self.tx.borrow().is_some() {
            self.tx.send_replace(None);
            sleep(self.dismiss_settle).await;
        }

        self.tx.send_replace(Some(message.into()));
        sleep(self.show_settle).await;
    }

    /// Dismiss the indicator, if any.
    pub async fn dismiss(&self) {
        let _cycle = self.gate.lock().await;
        self.tx.send_replace(None);
    }
}

impl Default for ProgressSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    fn spawn_recorder(
        mut rx: watch::Receiver<Option<String>>,
    ) -> (Arc<StdMutex<Vec<Option<String>>>>, tokio::task::JoinHandle<()>) {
        let history = Arc::new(StdMutex::new(Vec::new()));
        let handle = tokio::spawn({
            let history = history.clone();
            async move {
                while rx.changed().await.is_ok() {
                    history.lock().unwrap().push(rx.borrow_and_update().clone());
                }
            }
        });
        (history, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_while_shown_runs_one_coalescing_cycle() {
        let signal = ProgressSignal::new();
        let (history, recorder) = spawn_recorder(signal.subscribe());

        signal.show("Connecting...").await;

        let replaced_at = tokio::time::Instant::now();
        signal.show("Creating invoice...").await;
        // dismiss-settle (500ms) + show-settle (100ms) before control returns
        assert_eq!(replaced_at.elapsed(), Duration::from_millis(600));

        drop(signal);
        recorder.await.unwrap();

        let seen = history.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                Some("Connecting...".to_string()),
                None,
                Some("Creating invoice...".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_show_skips_the_dismiss_phase() {
        let signal = ProgressSignal::new();

        let started = tokio::time::Instant::now();
        signal.show("Loading...").await;
        assert_eq!(started.elapsed(), Duration::from_millis(100));
        assert!(signal.is_shown());

        signal.dismiss().await;
        assert!(!signal.is_shown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_shows_never_overlap() {
        let signal = Arc::new(ProgressSignal::new());
        let (history, recorder) = spawn_recorder(signal.subscribe());

        signal.show("first").await;

        let a = tokio::spawn({
            let signal = signal.clone();
            async move { signal.show("second").await }
        });
        let b = tokio::spawn({
            let signal = signal.clone();
            async move { signal.show("third").await }
        });
        a.await.unwrap();
        b.await.unwrap();

        drop(signal);
        recorder.await.unwrap();

        // Every replacement is separated by an explicit dismiss: no two
        // consecutive Some values.
        let seen = history.lock().unwrap().clone();
        for pair in seen.windows(2) {
            assert!(
                !(pair[0].is_some() && pair[1].is_some()),
                "overlapping shows observed: {:?}",
                seen
            );
        }
        assert!(seen.last().unwrap().is_some());
    }
}
