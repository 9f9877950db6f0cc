//! Card Editor Component
//!
//! Inline title/notes inputs for the card in edit mode.

use leptos::html;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::actions;
use crate::context::use_app_context;
use crate::dom;
use crate::edit::SaveTrigger;
use crate::models::CardId;
use crate::store::{editing_id_untracked, with_session, with_session_untracked};

#[component]
pub fn CardEditor(card_id: CardId) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let title_ref = NodeRef::<html::Input>::new();

    // Inputs own their text while editing; seed them once from the draft
    let (title, notes) = with_session_untracked(&store, |s| {
        s.map(|s| (s.draft().title.clone(), s.draft().notes.clone()))
            .unwrap_or_default()
    });

    let focus_requests = Memo::new(move |_| with_session(&store, |s| s.map(|s| s.focus_requests()).unwrap_or(0)));
    Effect::new(move |_| {
        focus_requests.track();
        if let Some(input) = title_ref.get() {
            let _ = input.focus();
            input.select();
        }
    });

    let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" if !ev.shift_key() => {
            ev.prevent_default();
            actions::save_edit(ctx, SaveTrigger::Manual);
        }
        "Escape" => {
            ev.prevent_default();
            actions::cancel_edit(ctx);
        }
        _ => {}
    };

    // Moving between the two fields (or onto the buttons) is not leaving the editor
    let on_blur = move |_| {
        dom::after(ctx.config(|c| c.blur_save_delay_ms), move || {
            let selector = format!("[data-card=\"{}\"] .card-editor", card_id);
            if editing_id_untracked(&store) == Some(card_id) && !dom::focus_within(&selector) {
                actions::save_edit(ctx, SaveTrigger::Blur);
            }
        });
    };

    view! {
        <div class="card-editor">
            <input
                class="edit-title"
                type="text"
                placeholder="Title"
                node_ref=title_ref
                prop:value=title
                on:input=move |ev| actions::edit_title(ctx, card_id, event_target_value(&ev))
                on:keydown=on_keydown
                on:blur=on_blur
            />
            <textarea
                class="edit-notes"
                rows="3"
                placeholder="Notes"
                prop:value=notes
                on:input=move |ev| actions::edit_notes(ctx, card_id, event_target_value(&ev))
                on:keydown=on_keydown
                on:blur=on_blur
            ></textarea>
            <div class="edit-actions">
                <button class="save-btn" on:click=move |_| actions::save_edit(ctx, SaveTrigger::Manual)>
                    "Save"
                </button>
                <button class="cancel-btn" on:click=move |_| actions::cancel_edit(ctx)>
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
