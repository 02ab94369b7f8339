//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::state::{App, DEFAULT_DEBOUNCE};
use crate::search::{SearchError, SearchProvider, SearchResultItem};

/// A provider that answers every search with the same canned outcome and
/// counts how often it was called.
pub struct StubProvider {
    outcome: Result<Vec<SearchResultItem>, SearchError>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn returning(keys: &[&str]) -> Self {
        Self {
            outcome: Ok(keys.iter().map(|k| SearchResultItem::with_key(*k)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, _keyword: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Creates a test App backed by a provider with no results.
pub fn test_app() -> App {
    App::new(Arc::new(StubProvider::returning(&[])), DEFAULT_DEBOUNCE)
}
