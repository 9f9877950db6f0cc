//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

use crate::config::UiConfig;
use crate::debounce::Debouncer;
use crate::store::AppStore;
use crate::toast::Toaster;

/// App-wide handles; every field is a cheap arena handle
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Board, edit session, selection, query
    pub store: AppStore,
    /// Toast notifications
    pub toaster: Toaster,
    /// Drag session
    pub dnd: DndSignals,
    /// Pending auto-save of the edit session
    pub autosave: Debouncer,
    config: StoredValue<UiConfig>,
}

impl AppContext {
    pub fn new(store: AppStore, config: UiConfig, dnd: DndSignals) -> Self {
        Self {
            store,
            toaster: Toaster::new(config.toast_timing()),
            dnd,
            autosave: Debouncer::new(config.autosave_delay_ms),
            config: StoredValue::new(config),
        }
    }

    /// Read a configuration value
    pub fn config<R>(&self, f: impl FnOnce(&UiConfig) -> R) -> R {
        self.config.with_value(f)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
