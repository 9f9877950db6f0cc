//! Board Component

use leptos::prelude::*;

use crate::components::{ColumnView, ToastHost, Toolbar};
use crate::context::use_app_context;
use crate::models::ColumnId;
use crate::store::with_board;

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_context().store;
    let column_ids = move || with_board(&store, |b| b.columns.iter().map(|c| c.id).collect::<Vec<ColumnId>>());

    view! {
        <Toolbar />
        <div class="board">
            <For
                each=column_ids
                key=|id| *id
                children=|id| view! { <ColumnView column_id=id /> }
            />
        </div>
        <ToastHost />
    }
}
