//! # Application State
//!
//! Core business state for the search screen. Presentation state (cursor,
//! scroll offset, selection) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn SearchProvider>  // remote search service
//! ├── query: String                      // current input text
//! ├── results: Vec<SearchResultItem>     // last settled result list
//! ├── is_loading: bool                   // latest request not yet settled
//! ├── debounce_delay: Duration           // pause required before searching
//! ├── debounce_generation: u64           // bumped on every query edit
//! ├── next_request_id: u64               // id for the next dispatched search
//! └── in_flight: Option<u64>             // id of the request whose answer we want
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::search::{SearchProvider, SearchResultItem};

/// Delay between the last keystroke and the search it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct App {
    pub provider: Arc<dyn SearchProvider>,
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub is_loading: bool,
    pub debounce_delay: Duration,
    /// Incremented on every query change. A timer only counts if it was
    /// armed for the current generation.
    pub debounce_generation: u64,
    pub next_request_id: u64,
    /// The most recently dispatched request that has not settled yet.
    /// Responses for any other id are stale.
    pub in_flight: Option<u64>,
}

impl App {
    pub fn new(provider: Arc<dyn SearchProvider>, debounce_delay: Duration) -> Self {
        Self {
            provider,
            query: String::new(),
            results: Vec::new(),
            is_loading: false,
            debounce_delay,
            debounce_generation: 0,
            next_request_id: 1,
            in_flight: None,
        }
    }

    pub fn from_config(provider: Arc<dyn SearchProvider>, config: &ResolvedConfig) -> Self {
        Self::new(provider, Duration::from_millis(config.debounce_ms))
    }

    /// Short status for the title bar. Failures are deliberately not
    /// distinguishable from an empty result set.
    pub fn status_line(&self) -> String {
        if self.is_loading {
            "Searching…".to_string()
        } else if self.results.is_empty() {
            String::new()
        } else if self.results.len() == 1 {
            "1 result".to_string()
        } else {
            format!("{} results", self.results.len())
        }
    }
}
