//! # Effect Runner
//!
//! Performs the I/O that `core::update` asks for. Background work reports
//! back as `Action`s on a `std::sync::mpsc` channel that the event loop
//! drains between frames.
//!
//! ```text
//! update() ──Effect──► EffectRunner ──► DebounceTimer (tokio sleep)
//!                                  └──► spawn_search   (tokio task)
//!                                            │
//!            event loop ◄──── Action ────────┘
//! ```

use log::{info, warn};
use std::sync::{Arc, mpsc};

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::search::SearchProvider;
use crate::tui::debounce::DebounceTimer;

pub struct EffectRunner {
    tx: mpsc::Sender<Action>,
    debounce: DebounceTimer,
}

impl EffectRunner {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self {
            tx,
            debounce: DebounceTimer::new(),
        }
    }

    /// Feed `action` through the reducer and carry out the resulting effect.
    /// Returns `true` when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        match update(app, action) {
            Effect::None => false,
            Effect::ArmDebounce { generation, delay } => {
                self.debounce
                    .arm(delay, self.tx.clone(), Action::DebounceElapsed { generation });
                false
            }
            Effect::SpawnSearch { request_id, query } => {
                spawn_search(app.provider.clone(), request_id, query, self.tx.clone());
                false
            }
            Effect::Quit => {
                self.shutdown();
                true
            }
        }
    }

    /// Whether a debounce timer is waiting to fire.
    pub fn has_pending_timer(&self) -> bool {
        self.debounce.is_armed()
    }

    /// Release the debounce timer. In-flight searches are left to finish;
    /// their results go nowhere once the receiver is gone.
    pub fn shutdown(&mut self) {
        if self.debounce.cancel() {
            info!("Cancelled pending debounce timer on shutdown");
        }
    }
}

fn spawn_search(
    provider: Arc<dyn SearchProvider>,
    request_id: u64,
    query: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning search {} via {}", request_id, provider.name());
    tokio::spawn(async move {
        let outcome = provider.search(&query).await;
        if tx
            .send(Action::SearchSettled {
                request_id,
                outcome,
            })
            .is_err()
        {
            warn!("Search {} settled after the receiver was dropped", request_id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::DEFAULT_DEBOUNCE;
    use crate::search::SearchError;
    use crate::test_support::StubProvider;
    use std::time::Duration;

    struct Harness {
        app: App,
        runner: EffectRunner,
        rx: mpsc::Receiver<Action>,
        provider: Arc<StubProvider>,
    }

    impl Harness {
        fn new(provider: StubProvider) -> Self {
            let provider = Arc::new(provider);
            let (tx, rx) = mpsc::channel();
            Self {
                app: App::new(provider.clone(), DEFAULT_DEBOUNCE),
                runner: EffectRunner::new(tx),
                rx,
                provider,
            }
        }

        fn type_query(&mut self, query: &str) {
            self.runner
                .dispatch(&mut self.app, Action::QueryChanged(query.to_string()));
        }

        /// Advance the paused clock and feed everything that arrives back in.
        async fn run_for(&mut self, duration: Duration) {
            tokio::time::advance(duration).await;
            for _ in 0..3 {
                for _ in 0..10 {
                    tokio::task::yield_now().await;
                }
                let pending: Vec<Action> = self.rx.try_iter().collect();
                for action in pending {
                    self.runner.dispatch(&mut self.app, action);
                }
            }
        }

        fn keys(&self) -> Vec<&str> {
            self.app.results.iter().map(|i| i.key.as_str()).collect()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_sends_one_request() {
        let mut h = Harness::new(StubProvider::returning(&["cat.png"]));
        for q in ["c", "ca", "cat"] {
            h.type_query(q);
            h.run_for(Duration::from_millis(100)).await;
        }
        assert_eq!(h.provider.calls(), 0, "still inside the debounce window");

        h.run_for(Duration::from_millis(500)).await;
        assert_eq!(h.provider.calls(), 1);
        assert_eq!(h.keys(), vec!["cat.png"]);
        assert!(!h.app.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_between_edits_sends_one_request_each() {
        let mut h = Harness::new(StubProvider::returning(&["x"]));
        h.type_query("a");
        h.run_for(Duration::from_millis(600)).await;
        h.type_query("ab");
        h.run_for(Duration::from_millis(600)).await;
        assert_eq!(h.provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_makes_no_request() {
        let mut h = Harness::new(StubProvider::returning(&["x"]));
        h.type_query("a");
        h.run_for(Duration::from_millis(600)).await;
        assert_eq!(h.keys(), vec!["x"]);

        h.type_query("");
        h.run_for(Duration::from_millis(600)).await;
        assert_eq!(h.provider.calls(), 1);
        assert!(h.app.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_clears_results() {
        let mut h = Harness::new(StubProvider::failing(SearchError::Network(
            "connection refused".to_string(),
        )));
        h.app.results = vec![crate::search::SearchResultItem::with_key("old")];
        h.type_query("a");
        h.run_for(Duration::from_millis(600)).await;
        assert_eq!(h.provider.calls(), 1);
        assert!(h.app.results.is_empty());
        assert!(!h.app.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_cancels_pending_timer() {
        let mut h = Harness::new(StubProvider::returning(&["x"]));
        h.type_query("a");
        assert!(h.runner.has_pending_timer());
        assert!(h.runner.dispatch(&mut h.app, Action::Quit));
        assert!(!h.runner.has_pending_timer());

        h.run_for(Duration::from_secs(1)).await;
        assert_eq!(h.provider.calls(), 0);
    }
}
