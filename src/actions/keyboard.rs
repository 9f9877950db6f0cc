use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use super::{begin_edit, cancel_edit, create_card, delete_card, quick_move};
use crate::context::AppContext;
use crate::dom;
use crate::shortcuts::{self, KeyPress, KeyState, Shortcut};
use crate::store::{editing_id_untracked, selected_untracked, with_board_untracked};

/// Listen for board shortcuts on the whole document
pub fn install_shortcuts(ctx: AppContext) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        handle_keydown(ctx, &ev);
    });

    if let Err(e) = document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref()) {
        log::error!("Could not install keyboard shortcuts: {:?}", e);
    }
    on_keydown.forget();
}

fn handle_keydown(ctx: AppContext, ev: &KeyboardEvent) {
    let key = ev.key();
    let press = KeyPress {
        key: &key,
        in_text_field: dom::is_text_field(ev.target()),
        on_button: dom::is_button(ev.target()),
        modified: ev.ctrl_key() || ev.meta_key() || ev.alt_key(),
    };
    let state = KeyState {
        editing: editing_id_untracked(&ctx.store).is_some(),
        selected: selected_untracked(&ctx.store),
        column_count: with_board_untracked(&ctx.store, |b| b.columns.len()),
    };
    let Some(shortcut) = shortcuts::dispatch(press, state) else {
        return;
    };
    ev.prevent_default();
    log::debug!("Shortcut {:?}", shortcut);

    match shortcut {
        Shortcut::NewCard => {
            if let Some(column_id) = with_board_untracked(&ctx.store, |b| b.first_column()) {
                create_card(ctx, column_id);
            }
        }
        Shortcut::DeleteSelected(card_id) => {
            if dom::confirm("Delete this card?") {
                delete_card(ctx, card_id);
            }
        }
        Shortcut::MoveSelected { card_id, column } => quick_move(ctx, card_id, column),
        Shortcut::EditSelected(card_id) => begin_edit(ctx, card_id),
        Shortcut::CancelEdit => cancel_edit(ctx),
    }
}
