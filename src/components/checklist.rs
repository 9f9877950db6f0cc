//! Checklist Component
//!
//! Progress bar, items and the add-item form of one card.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::{class_list, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::models::{CardId, ItemId, Progress};
use crate::store::{is_item_leaving, with_board};

#[component]
pub fn Checklist(card_id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let progress = Memo::new(move |_| with_board(&store, |b| b.card(card_id).map(|c| c.progress()).unwrap_or_default()));
    let item_ids = move || {
        with_board(&store, |b| {
            b.card(card_id)
                .map(|c| c.checklist.iter().map(|i| i.id).collect::<Vec<ItemId>>())
                .unwrap_or_default()
        })
    };

    let (new_text, set_new_text) = signal(String::new());
    let (adding, set_adding) = signal(false);

    let add = move || {
        let text = new_text.get_untracked();
        if text.trim().is_empty() || adding.get_untracked() {
            return;
        }
        set_adding.set(true);
        spawn_local(async move {
            if actions::add_item(ctx, card_id, text).await {
                set_new_text.set(String::new());
            }
            set_adding.set(false);
        });
    };

    view! {
        <div class="checklist" on:dblclick=|ev| ev.stop_propagation()>
            <Show when=move || { progress.get().total > 0 }>
                <ProgressBar progress=progress />
                <ul class="checklist-items">
                    <For
                        each=item_ids
                        key=|id| *id
                        children=move |id| view! { <ChecklistRow card_id=card_id item_id=id /> }
                    />
                </ul>
            </Show>
            <form
                class="checklist-add"
                on:submit=move |ev| {
                    ev.prevent_default();
                    add();
                }
            >
                <input
                    type="text"
                    class="checklist-input"
                    placeholder="Add item"
                    prop:value=move || new_text.get()
                    prop:disabled=move || adding.get()
                    on:input=move |ev| set_new_text.set(event_target_value(&ev))
                />
            </form>
        </div>
    }
}

#[component]
fn ProgressBar(progress: Memo<Progress>) -> impl IntoView {
    view! {
        <div class="checklist-progress">
            <span class="progress-label">{move || progress.get().label()}</span>
            <div class="progress-track">
                <div
                    class="progress-fill"
                    style:width=move || format!("{:.0}%", progress.get().percent())
                ></div>
            </div>
        </div>
    }
}

#[component]
fn ChecklistRow(card_id: CardId, item_id: ItemId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let item = Memo::new(move |_| {
        with_board(&store, |b| {
            b.card(card_id)
                .and_then(|c| c.checklist.iter().find(|i| i.id == item_id))
                .map(|i| (i.text.clone(), i.done))
        })
    });
    let done = move || item.get().is_some_and(|(_, done)| done);
    let text = move || item.get().map(|(text, _)| text).unwrap_or_default();

    view! {
        <li
            class=move || class_list("checklist-item", &[("checked", done()), ("leaving", is_item_leaving(&store, item_id))])
            data-item-id=item_id.to_string()
        >
            <button
                class="check-btn"
                title="Toggle"
                on:click=move |ev| {
                    ev.stop_propagation();
                    actions::toggle_item(ctx, item_id);
                }
            >
                {move || if done() { "☑" } else { "☐" }}
            </button>
            <span class=move || class_list("checklist-text", &[("done", done())])>{text}</span>
            <DeleteConfirmButton
                button_class="item-delete-btn"
                on_confirm=Callback::new(move |_| actions::delete_item(ctx, item_id))
            />
        </li>
    }
}
