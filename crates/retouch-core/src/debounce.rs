//! Trailing-edge debounce for bursts of high-frequency input.
//!
//! A slider dragged across its range fires dozens of resize requests per
//! second. Only the one the user settles on should reach the history; the
//! rest are superseded and never executed.
//!
//! The debouncer is driven by caller-supplied millisecond timestamps instead
//! of a timer, so the host decides where time comes from (`Instant` on
//! native, `performance.now()` in the browser).

use tracing::trace;

/// Default quiescence window for resize requests, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Holds at most one pending value until its quiescence window elapses.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window_ms: u64,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline_ms: u64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Schedule `value` to settle `window_ms` after `now_ms`.
    ///
    /// Any value still pending is cancelled and handed back.
    pub fn submit(&mut self, value: T, now_ms: u64) -> Option<T> {
        let deadline_ms = now_ms.saturating_add(self.window_ms);
        let superseded = self.pending.replace(Pending { value, deadline_ms });
        if superseded.is_some() {
            trace!(deadline_ms, "superseded pending request");
        }
        superseded.map(|pending| pending.value)
    }

    /// Take the pending value if its window has elapsed by `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some(pending) if now_ms >= pending.deadline_ms => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Drop the pending value without executing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|pending| &pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will settle, if there is one.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.deadline_ms)
    }
}
