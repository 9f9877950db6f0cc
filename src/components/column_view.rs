//! Column Component
//!
//! One board column: header with live count, "+" button and a drop area
//! holding the cards.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragleave, make_on_dragover, make_on_drop, DropAction};

use crate::actions;
use crate::components::{class_list, CardView};
use crate::context::use_app_context;
use crate::models::{CardId, ColumnId};
use crate::store::{with_board, CardEffect};

/// Sibling cards inside a drop area, and where their id lives
const CARD_SELECTOR: &str = "[data-card]";
const CARD_ID_ATTR: &str = "data-card";

#[component]
pub fn ColumnView(column_id: ColumnId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let dnd = ctx.dnd;

    let name = move || with_board(&store, |b| b.column(column_id).map(|c| c.name.clone()).unwrap_or_default());
    let count = move || with_board(&store, |b| b.column(column_id).map(|c| c.count_label()).unwrap_or_default());
    let card_ids = move || {
        with_board(&store, |b| {
            b.column(column_id)
                .map(|c| c.cards.iter().map(|card| card.id).collect::<Vec<CardId>>())
                .unwrap_or_default()
        })
    };
    let is_over = move || dnd.over_target_read.get() == Some(column_id);

    let on_drop = Callback::new(move |drop: DropAction| {
        log::debug!("Drop card {} on column {} at {}", drop.item_id, drop.target_id, drop.index);
        actions::move_card(ctx, drop.item_id, drop.target_id, drop.index, CardEffect::Settle);
    });

    view! {
        <section
            class=move || class_list("col", &[("drag-over", is_over())])
            data-col=column_id.to_string()
        >
            <header class="col-header">
                <h2 class="col-title">{name}</h2>
                <span class="col-count">{count}</span>
                <button
                    class="add-card-btn"
                    title="Add card"
                    on:click=move |_| actions::create_card(ctx, column_id)
                >
                    "+"
                </button>
            </header>
            <div
                class="col-cards"
                on:dragover=make_on_dragover(dnd, column_id)
                on:dragleave=make_on_dragleave(dnd, column_id)
                on:drop=make_on_drop(dnd, column_id, CARD_SELECTOR, CARD_ID_ATTR, on_drop)
            >
                <For
                    each=card_ids
                    key=|id| *id
                    children=move |id| view! { <CardView card_id=id /> }
                />
            </div>
        </section>
    }
}
