//! Card Component
//!
//! A draggable card. Shows either its summary or the inline editor, then
//! its checklist and quick actions.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};

use crate::actions;
use crate::components::{class_list, CardEditor, Checklist, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::models::{Card, CardId, ColumnId};
use crate::search;
use crate::store::{card_effect, editing_id, is_flushing, query, selected, with_board, with_session, CardEffect};

#[component]
pub fn CardView(card_id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let dnd = ctx.dnd;

    let card = Memo::new(move |_| with_board(&store, |b| b.card(card_id).cloned()));
    let is_editing = Memo::new(move |_| editing_id(&store) == Some(card_id));
    let is_saving = Memo::new(move |_| {
        with_session(&store, |s| s.is_some_and(|s| s.card_id == card_id && s.is_saving())) || is_flushing(&store, card_id)
    });
    let is_filtered = Memo::new(move |_| {
        let q = query(&store);
        card.with(|c| c.as_ref().is_some_and(|c| !search::is_visible(c, &q)))
    });

    let classes = move || {
        let effect = card_effect(&store, card_id);
        class_list(
            "card",
            &[
                ("selected", selected(&store) == Some(card_id)),
                ("editing", is_editing.get()),
                ("dragging", dnd.dragging_id_read.get() == Some(card_id)),
                ("loading", is_saving.get()),
                ("filtered", is_filtered.get()),
                (effect.map(CardEffect::css_class).unwrap_or(""), effect.is_some()),
            ],
        )
    };
    let can_drag = move || !is_editing.get_untracked();

    view! {
        <article
            class=classes
            data-card=card_id.to_string()
            draggable=move || if is_editing.get() { "false" } else { "true" }
            style:display=move || if is_filtered.get() { "none" } else { "" }
            on:dragstart=make_on_dragstart(dnd, card_id, can_drag)
            on:dragend=make_on_dragend(dnd)
            on:click=move |_| actions::select_card(ctx, card_id)
            on:dblclick=move |_| actions::begin_edit(ctx, card_id)
        >
            <Show
                when=move || is_editing.get()
                fallback=move || view! { <CardSummary card=card /> }
            >
                <CardEditor card_id=card_id />
            </Show>
            <Checklist card_id=card_id />
            <CardActions card_id=card_id />
        </article>
    }
}

/// Title, notes and due date of a card not in edit mode
#[component]
fn CardSummary(card: Memo<Option<Card>>) -> impl IntoView {
    let title = move || card.with(|c| c.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let notes = move || card.with(|c| c.as_ref().map(|c| c.notes.clone()).unwrap_or_default());
    let due = move || card.with(|c| c.as_ref().and_then(|c| c.due.clone()));

    view! {
        <strong class="card-title">{title}</strong>
        <Show when=move || !notes().is_empty()>
            <div class="muted">{notes}</div>
        </Show>
        {move || due().map(|d| view! { <span class="due">{d}</span> })}
    }
}

/// Move-to-column selector and delete button
#[component]
fn CardActions(card_id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let columns = move || {
        with_board(&store, |b| {
            b.columns
                .iter()
                .map(|c| (c.id, c.name.clone()))
                .collect::<Vec<_>>()
        })
    };
    let on_move = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        if let Ok(column_id) = value.parse::<ColumnId>() {
            actions::move_card(ctx, card_id, column_id, 0, CardEffect::Bounce);
        }
        event_target::<web_sys::HtmlSelectElement>(&ev).set_value("");
    };

    view! {
        <div class="card-actions" on:dblclick=|ev| ev.stop_propagation()>
            <select class="move-select" title="Move to column" on:change=on_move>
                <option value="">"Move to…"</option>
                <For
                    each=columns
                    key=|(id, name)| (*id, name.clone())
                    children=|(id, name)| view! { <option value=id.to_string()>{name}</option> }
                />
            </select>
            <DeleteConfirmButton
                button_class="card-delete-btn"
                on_confirm=Callback::new(move |_| actions::delete_card(ctx, card_id))
            />
        </div>
    }
}
