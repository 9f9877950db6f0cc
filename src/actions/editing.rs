use leptos::task::spawn_local;

use super::settle_board;
use crate::commands;
use crate::context::AppContext;
use crate::edit::{self, EditSession, SaveOutcome, SavePlan, SaveTrigger};
use crate::models::CardId;
use crate::optimistic;
use crate::store::{
    clear_editing, editing_id_untracked, is_flushing_untracked, set_selected, update_board, update_editing,
    update_state, with_board_untracked,
};

/// Put `card_id` into edit mode, flushing whatever card was being edited
pub fn begin_edit(ctx: AppContext, card_id: CardId) {
    let Some(card) = with_board_untracked(&ctx.store, |b| b.card(card_id).cloned()) else {
        return;
    };
    let previous = update_editing(&ctx.store, |slot| edit::switch_session(slot, &card));
    set_selected(&ctx.store, Some(card_id));

    if let Some(previous) = previous {
        ctx.autosave.cancel();
        flush_session(ctx, previous);
    }
}

/// Save a session that already left edit mode. Its card shows the new text
/// immediately and reverts if the server refuses.
fn flush_session(ctx: AppContext, mut session: EditSession) {
    let card_id = session.card_id;
    let fields = match session.plan_save(SaveTrigger::Switch) {
        SavePlan::Send { fields, .. } => fields,
        SavePlan::EmptyTitle => {
            log::info!("Discarding edit of card {} with an empty title", card_id);
            ctx.toaster.info("Empty title discarded, card left unchanged");
            return;
        }
        SavePlan::Unchanged | SavePlan::Busy => return,
    };

    let rollback = update_state(&ctx.store, |s| {
        s.begin_flush(card_id);
        optimistic::apply(&mut s.board, |b| b.set_fields_undoable(card_id, &fields))
    });

    spawn_local(async move {
        let outcome = commands::update_card(card_id, &fields).await;
        update_state(&ctx.store, |s| s.end_flush(card_id));
        if let Some(card) = settle_board(ctx, rollback, outcome, "Could not save card") {
            update_board(&ctx.store, |b| b.replace_card(card));
        }
    });
}

/// Save the card in edit mode
pub fn save_edit(ctx: AppContext, trigger: SaveTrigger) {
    let store = ctx.store;
    let Some((card_id, plan)) =
        update_editing(&store, |slot| slot.as_mut().map(|s| (s.card_id, s.plan_save(trigger))))
    else {
        return;
    };

    match plan {
        SavePlan::EmptyTitle => {
            // Blur and auto-save leave a blank title alone
            if trigger.is_interactive() {
                ctx.toaster.warning("Title cannot be empty");
                update_editing(&store, |slot| {
                    if let Some(session) = slot {
                        session.request_focus();
                    }
                });
            }
        }
        SavePlan::Unchanged => {
            if trigger.ends_session() {
                ctx.autosave.cancel();
                clear_editing(&store, card_id);
            }
        }
        SavePlan::Busy => {}
        SavePlan::Send { ticket, fields } => {
            if trigger.ends_session() {
                ctx.autosave.cancel();
            }
            log::debug!("Saving card {} ({:?}, ticket {})", card_id, trigger, ticket);
            spawn_local(async move {
                let result = commands::update_card(card_id, &fields).await;
                let outcome = update_editing(&store, |slot| edit::land_save(slot, card_id, ticket, result.is_ok()));
                match (outcome, result) {
                    (SaveOutcome::Saved { ends_session }, Ok(card)) => {
                        log::info!("Saved card {}", card_id);
                        update_board(&store, |b| b.replace_card(card));
                        if ends_session {
                            clear_editing(&store, card_id);
                        } else {
                            run_queued(ctx, card_id);
                        }
                    }
                    (SaveOutcome::Failed, Err(e)) => {
                        log::error!("Failed to save card {}: {}", card_id, e);
                        ctx.toaster.error(format!("Could not save card: {}", e));
                        run_queued(ctx, card_id);
                    }
                    (SaveOutcome::Detached, Ok(card)) => {
                        // A switch flush of the same card answers later and wins
                        if !is_flushing_untracked(&store, card_id) {
                            log::debug!("Applying save of card {} that left edit mode", card_id);
                            update_board(&store, |b| b.replace_card(card));
                        }
                    }
                    (SaveOutcome::Detached, Err(e)) => {
                        log::warn!("Save of card {} failed after it left edit mode: {}", card_id, e);
                    }
                    _ => log::debug!("Ignoring superseded save of card {} (ticket {})", card_id, ticket),
                }
            });
        }
    }
}

/// Re-run a background save that arrived while another one was in flight
fn run_queued(ctx: AppContext, card_id: CardId) {
    let queued = update_editing(&ctx.store, |slot| match slot {
        Some(session) if session.card_id == card_id => session.take_queued(),
        _ => None,
    });
    if let Some(trigger) = queued {
        log::debug!("Running queued {:?} save of card {}", trigger, card_id);
        save_edit(ctx, trigger);
    }
}

/// Leave edit mode without saving
pub fn cancel_edit(ctx: AppContext) {
    ctx.autosave.cancel();
    let Some(session) = update_editing(&ctx.store, |slot| slot.take()) else {
        return;
    };
    let card_id = session.card_id;
    let shown = session.cancel();
    update_board(&ctx.store, |b| {
        if let Some(card) = b.card_mut(card_id) {
            shown.apply_to(card);
        }
    });
    log::debug!("Cancelled edit of card {}", card_id);
}

/// Record a keystroke in the title field and schedule an auto-save
pub fn edit_title(ctx: AppContext, card_id: CardId, title: String) {
    update_draft(ctx, card_id, move |s| s.set_title(title));
}

pub fn edit_notes(ctx: AppContext, card_id: CardId, notes: String) {
    update_draft(ctx, card_id, move |s| s.set_notes(notes));
}

fn update_draft(ctx: AppContext, card_id: CardId, f: impl FnOnce(&mut EditSession)) {
    let updated = update_editing(&ctx.store, |slot| match slot {
        Some(session) if session.card_id == card_id => {
            f(session);
            true
        }
        _ => false,
    });
    if !updated {
        return;
    }
    let store = ctx.store;
    ctx.autosave.call(move || {
        if editing_id_untracked(&store) == Some(card_id) {
            save_edit(ctx, SaveTrigger::Auto);
        }
    });
}
