use leptos::task::spawn_local;

use super::{begin_edit, flash, settle_board, settle_state};
use crate::commands;
use crate::context::AppContext;
use crate::dom;
use crate::models::{CardId, ColumnId};
use crate::optimistic::{self, Rollback};
use crate::store::{
    clear_editing, editing_id_untracked, selected_untracked, set_selected, update_board, update_state,
    with_board_untracked, AppState, CardEffect,
};

pub fn select_card(ctx: AppContext, card_id: CardId) {
    set_selected(&ctx.store, Some(card_id));
}

/// Create a card at the top of `column_id` and open it for editing
pub fn create_card(ctx: AppContext, column_id: ColumnId) {
    let title = ctx.config(|c| c.new_card_title.clone());
    spawn_local(async move {
        let card = match commands::create_card(column_id, &title, "").await {
            Ok(card) => card,
            Err(e) => {
                log::error!("Failed to create card in column {}: {}", column_id, e);
                ctx.toaster.error(format!("Could not create card: {}", e));
                return;
            }
        };
        let card_id = card.id;
        log::info!("Created card {} in column {}", card_id, column_id);

        update_board(&ctx.store, |b| b.insert_card(column_id, 0, card));
        flash(ctx, card_id, CardEffect::Enter);
        begin_edit(ctx, card_id);

        // The server appends new cards; pin this one to the top like the UI shows
        if let Err(e) = commands::move_card(card_id, column_id, 0).await {
            log::warn!("Could not pin card {} to the top of column {}: {}", card_id, column_id, e);
        }
    });
}

/// Move a card to `position` within `column_id`; used by drops and quick moves
pub fn move_card(ctx: AppContext, card_id: CardId, column_id: ColumnId, position: usize, effect: CardEffect) {
    let rollback = update_board(&ctx.store, |b| {
        optimistic::apply(b, |b| b.move_card_undoable(card_id, column_id, position))
    });
    if rollback.is_noop() {
        log::warn!("Ignoring move of card {} to unknown column {}", card_id, column_id);
        return;
    }

    // Position after clamping to the target column's length
    let position = with_board_untracked(&ctx.store, |b| b.locate(card_id).map(|p| p.position)).unwrap_or(position);
    flash(ctx, card_id, effect);
    log::debug!("Moving card {} to column {} at {}", card_id, column_id, position);

    spawn_local(async move {
        let outcome = commands::move_card(card_id, column_id, position).await;
        settle_board(ctx, rollback, outcome, "Could not move card");
    });
}

/// Move a card to the top of the column at a 0-based ordinal
pub fn quick_move(ctx: AppContext, card_id: CardId, ordinal: usize) {
    let Some(column_id) = with_board_untracked(&ctx.store, |b| b.column_at(ordinal)) else {
        return;
    };
    move_card(ctx, card_id, column_id, 0, CardEffect::Bounce);
}

/// Delete after the caller confirmed; the card fades out once the server agrees
pub fn delete_card(ctx: AppContext, card_id: CardId) {
    if editing_id_untracked(&ctx.store) == Some(card_id) {
        ctx.autosave.cancel();
        clear_editing(&ctx.store, card_id);
    }
    if selected_untracked(&ctx.store) == Some(card_id) {
        set_selected(&ctx.store, None);
    }

    let rollback = update_state(&ctx.store, |s| {
        optimistic::apply(s, |s| {
            s.effects.insert(card_id, CardEffect::Leaving);
            Rollback::new(move |s: &mut AppState| {
                s.effects.remove(&card_id);
            })
        })
    });

    spawn_local(async move {
        let outcome = commands::delete_card(card_id).await;
        if settle_state(ctx, rollback, outcome, "Could not delete card").is_none() {
            return;
        }
        log::info!("Deleted card {}", card_id);
        ctx.toaster.success("Card deleted");
        let store = ctx.store;
        dom::after(ctx.config(|c| c.leave_animation_ms), move || {
            update_state(&store, |s| {
                s.board.remove_card(card_id);
                s.effects.remove(&card_id);
            });
        });
    });
}
