use leptos::task::spawn_local;

use super::{settle_board, settle_state};
use crate::commands;
use crate::context::AppContext;
use crate::dom;
use crate::models::{CardId, ItemId};
use crate::optimistic::{self, Rollback};
use crate::store::{update_board, update_state, AppState};

/// Flip an item; progress follows from the model
pub fn toggle_item(ctx: AppContext, item_id: ItemId) {
    let rollback = update_board(&ctx.store, |b| optimistic::apply(b, |b| b.toggle_item_undoable(item_id)));
    if rollback.is_noop() {
        return;
    }
    spawn_local(async move {
        let outcome = commands::toggle_item(item_id).await;
        settle_board(ctx, rollback, outcome, "Could not update checklist");
    });
}

/// Append an item once the server has assigned its id. Returns whether it was added.
pub async fn add_item(ctx: AppContext, card_id: CardId, text: String) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    match commands::add_item(card_id, text).await {
        Ok(item) => {
            log::info!("Added checklist item {} to card {}", item.id, card_id);
            update_board(&ctx.store, |b| b.push_item(card_id, item))
        }
        Err(e) => {
            log::error!("Failed to add checklist item to card {}: {}", card_id, e);
            ctx.toaster.error(format!("Could not add item: {}", e));
            false
        }
    }
}

/// Delete after the caller confirmed; the item fades out once the server agrees
pub fn delete_item(ctx: AppContext, item_id: ItemId) {
    let rollback = update_state(&ctx.store, |s| {
        optimistic::apply(s, |s| {
            s.leaving_items.insert(item_id);
            Rollback::new(move |s: &mut AppState| {
                s.leaving_items.remove(&item_id);
            })
        })
    });

    spawn_local(async move {
        let outcome = commands::delete_item(item_id).await;
        if settle_state(ctx, rollback, outcome, "Could not delete item").is_none() {
            return;
        }
        log::info!("Deleted checklist item {}", item_id);
        ctx.toaster.success("Item deleted");
        let store = ctx.store;
        dom::after(ctx.config(|c| c.leave_animation_ms), move || {
            update_state(&store, |s| {
                s.board.remove_item(item_id);
                s.leaving_items.remove(&item_id);
            });
        });
    });
}
