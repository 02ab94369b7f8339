//! # Debounce Timer
//!
//! Owns the single pending timer of the search screen. Arming a new timer
//! aborts the previous one first, and dropping the timer aborts whatever is
//! pending, so a fired timer never reaches a torn-down event loop.

use log::debug;
use std::sync::mpsc;
use std::time::Duration;
use tokio::task::AbortHandle;

use crate::core::action::Action;

#[derive(Default)]
pub struct DebounceTimer {
    pending: Option<AbortHandle>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending timer, then send `action` on `tx` after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, delay: Duration, tx: mpsc::Sender<Action>, action: Action) {
        self.cancel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(action).is_err() {
                debug!("Debounce fired after the receiver was dropped");
            }
        });
        self.pending = Some(handle.abort_handle());
    }

    /// Abort the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
