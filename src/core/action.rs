//! # Actions
//!
//! Everything that can happen on the search screen becomes an `Action`.
//! User edits the query? That's `Action::QueryChanged(text)`.
//! The debounce timer fires? That's `Action::DebounceElapsed { generation }`.
//! The service answers? That's `Action::SearchSettled { request_id, outcome }`.
//!
//! `update()` mutates the state and returns an `Effect` describing the I/O
//! the caller has to perform. No side effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Debounce and ordering
//!
//! ```text
//! QueryChanged ──► ArmDebounce{gen}
//!                     │ (timer, cancelled by the next edit)
//!                     ▼
//! DebounceElapsed{gen} ──► empty query: clear results, no request
//!                      └─► otherwise:   SpawnSearch{id}, is_loading = true
//!                                          │
//!                                          ▼
//! SearchSettled{id} ──► id == in_flight: apply, is_loading = false
//!                   └─► otherwise:       stale, dropped
//! ```

use log::{debug, info, warn};
use std::time::Duration;

use crate::core::state::App;
use crate::search::{SearchError, SearchResultItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input text is now this value.
    QueryChanged(String),
    /// The timer armed for `generation` ran to completion.
    DebounceElapsed { generation: u64 },
    /// A dispatched search finished, successfully or not.
    SearchSettled {
        request_id: u64,
        outcome: Result<Vec<SearchResultItem>, SearchError>,
    },
    Quit,
}

/// I/O the caller must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Cancel any pending timer, then arm a new one for `generation`.
    ArmDebounce { generation: u64, delay: Duration },
    /// Run a search for `query` and report back with `request_id`.
    SpawnSearch { request_id: u64, query: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::QueryChanged(query) => {
            if query == app.query {
                return Effect::None;
            }
            app.query = query;
            app.debounce_generation += 1;
            debug!(
                "Query changed to {:?}, arming debounce generation {}",
                app.query, app.debounce_generation
            );
            Effect::ArmDebounce {
                generation: app.debounce_generation,
                delay: app.debounce_delay,
            }
        }
        Action::DebounceElapsed { generation } => {
            if generation != app.debounce_generation {
                debug!(
                    "Ignoring stale debounce generation {} (current {})",
                    generation, app.debounce_generation
                );
                return Effect::None;
            }

            if app.query.is_empty() {
                app.results.clear();
                // Whatever was in flight answers a query that is gone now.
                if let Some(superseded) = app.in_flight.take() {
                    debug!("Empty query supersedes request {}", superseded);
                    app.is_loading = false;
                }
                return Effect::None;
            }

            let request_id = app.next_request_id;
            app.next_request_id += 1;
            app.in_flight = Some(request_id);
            app.is_loading = true;
            info!("Dispatching search {} for {:?}", request_id, app.query);
            Effect::SpawnSearch {
                request_id,
                query: app.query.clone(),
            }
        }
        Action::SearchSettled {
            request_id,
            outcome,
        } => {
            if app.in_flight != Some(request_id) {
                debug!(
                    "Discarding stale response for request {} (waiting for {:?})",
                    request_id, app.in_flight
                );
                return Effect::None;
            }

            app.in_flight = None;
            app.is_loading = false;
            match outcome {
                Ok(items) => {
                    info!("Search {} settled with {} results", request_id, items.len());
                    app.results = items;
                }
                Err(e) => {
                    warn!("Search {} failed: {}", request_id, e);
                    app.results.clear();
                }
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
