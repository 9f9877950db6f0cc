//! Kanban Board Frontend App
//!
//! Root component: builds the store from the server-rendered board and
//! provides the shared context.

use leptos::prelude::*;
use leptos_dragdrop::create_dnd_signals;
use reactive_stores::Store;

use crate::actions;
use crate::components::BoardView;
use crate::config::UiConfig;
use crate::context::AppContext;
use crate::models::Board;
use crate::store::AppState;

#[component]
pub fn App(board: Board, config: UiConfig) -> impl IntoView {
    log::info!(
        "Starting board with {} columns and {} cards",
        board.columns.len(),
        board.card_count()
    );

    let store = Store::new(AppState::new(board));
    let ctx = AppContext::new(store, config, create_dnd_signals());

    // Provide context to all children
    provide_context(ctx);
    actions::install_shortcuts(ctx);

    view! {
        <div class="app-layout">
            <BoardView />
        </div>
    }
}
