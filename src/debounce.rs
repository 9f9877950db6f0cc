//! Debounce Utility
//!
//! Runs a callback once calls have stopped for `delay_ms`.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Holds at most one pending timer; every call replaces it.
/// Dropping a `Timeout` cancels it (a fired one is simply released).
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    pending: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: StoredValue::new_local(None),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        self.pending.set_value(Some(Timeout::new(self.delay_ms, f)));
    }

    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}
