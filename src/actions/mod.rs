//! Board Actions
//!
//! What handlers call: mutate the store right away, talk to the server in
//! the background, and roll back with an error toast if the server refuses.

mod card;
mod checklist;
mod editing;
mod keyboard;

pub use card::*;
pub use checklist::*;
pub use editing::*;
pub use keyboard::install_shortcuts;

use crate::context::AppContext;
use crate::dom;
use crate::error::ApiError;
use crate::models::{Board, CardId};
use crate::optimistic::{self, Rollback};
use crate::store::{clear_card_effect, set_card_effect, update_board, update_state, AppState, CardEffect};

/// Keep or undo a board mutation once the server has answered
fn settle_board<T>(ctx: AppContext, rollback: Rollback<Board>, outcome: Result<T, ApiError>, failure: &str) -> Option<T> {
    let outcome = update_board(&ctx.store, |b| optimistic::settle(b, rollback, outcome));
    report(ctx, outcome, failure)
}

/// Same as [`settle_board`] for mutations spanning several store fields
fn settle_state<T>(ctx: AppContext, rollback: Rollback<AppState>, outcome: Result<T, ApiError>, failure: &str) -> Option<T> {
    let outcome = update_state(&ctx.store, |s| optimistic::settle(s, rollback, outcome));
    report(ctx, outcome, failure)
}

fn report<T>(ctx: AppContext, outcome: Result<T, ApiError>, failure: &str) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{}: {}", failure, e);
            ctx.toaster.error(format!("{}: {}", failure, e));
            None
        }
    }
}

/// Play a one-shot card animation
fn flash(ctx: AppContext, card_id: CardId, effect: CardEffect) {
    set_card_effect(&ctx.store, card_id, effect);
    let store = ctx.store;
    dom::after(ctx.config(|c| c.animation_ms), move || {
        clear_card_effect(&store, card_id, effect);
    });
}
