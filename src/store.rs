//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use reactive_stores::Store;

use crate::edit::EditSession;
use crate::models::{Board, CardId, ItemId};

/// Transient animation state of a card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardEffect {
    /// Just created
    Enter,
    /// Just dropped into a column
    Settle,
    /// Just moved by shortcut or move selector
    Bounce,
    /// Shrinking/fading out before removal
    Leaving,
}

impl CardEffect {
    pub fn css_class(self) -> &'static str {
        match self {
            CardEffect::Enter => "card-enter",
            CardEffect::Settle => "card-settle",
            CardEffect::Bounce => "card-bounce",
            CardEffect::Leaving => "card-leaving",
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Columns, cards and checklists
    pub board: Board,
    /// The one card in edit mode
    pub editing: Option<EditSession>,
    /// The one card targeted by keyboard shortcuts
    pub selected: Option<CardId>,
    /// Active search query (already debounced)
    pub query: String,
    /// Running card animations
    pub effects: HashMap<CardId, CardEffect>,
    /// Checklist items fading out
    pub leaving_items: HashSet<ItemId>,
    /// Saves still in flight for cards that already left edit mode
    pub flushing: HashMap<CardId, u32>,
}

impl AppState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Default::default()
        }
    }

    pub fn begin_flush(&mut self, card_id: CardId) {
        *self.flushing.entry(card_id).or_insert(0) += 1;
    }

    pub fn end_flush(&mut self, card_id: CardId) {
        if let Some(n) = self.flushing.get_mut(&card_id) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.flushing.remove(&card_id);
            }
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Read the board (tracked)
pub fn with_board<R>(store: &AppStore, f: impl FnOnce(&Board) -> R) -> R {
    f(&store.board().read())
}

/// Read the board without subscribing
pub fn with_board_untracked<R>(store: &AppStore, f: impl FnOnce(&Board) -> R) -> R {
    f(&store.board().read_untracked())
}

pub fn update_board<R>(store: &AppStore, f: impl FnOnce(&mut Board) -> R) -> R {
    f(&mut store.board().write())
}

/// Mutate several fields at once
pub fn update_state<R>(store: &AppStore, f: impl FnOnce(&mut AppState) -> R) -> R {
    f(&mut store.write())
}

/// Id of the card in edit mode (tracked)
pub fn editing_id(store: &AppStore) -> Option<CardId> {
    (*store.editing().read()).as_ref().map(|s| s.card_id)
}

pub fn editing_id_untracked(store: &AppStore) -> Option<CardId> {
    (*store.editing().read_untracked()).as_ref().map(|s| s.card_id)
}

/// Read the edit session (tracked)
pub fn with_session<R>(store: &AppStore, f: impl FnOnce(Option<&EditSession>) -> R) -> R {
    f((*store.editing().read()).as_ref())
}

pub fn with_session_untracked<R>(store: &AppStore, f: impl FnOnce(Option<&EditSession>) -> R) -> R {
    f((*store.editing().read_untracked()).as_ref())
}

/// Mutate the edit slot
pub fn update_editing<R>(store: &AppStore, f: impl FnOnce(&mut Option<EditSession>) -> R) -> R {
    f(&mut store.editing().write())
}

/// Drop the edit session, but only if it still belongs to `card_id`
pub fn clear_editing(store: &AppStore, card_id: CardId) {
    if editing_id_untracked(store) == Some(card_id) {
        store.editing().set(None);
    }
}

pub fn selected(store: &AppStore) -> Option<CardId> {
    store.selected().get()
}

pub fn selected_untracked(store: &AppStore) -> Option<CardId> {
    store.selected().get_untracked()
}

pub fn set_selected(store: &AppStore, card_id: Option<CardId>) {
    if store.selected().get_untracked() != card_id {
        store.selected().set(card_id);
    }
}

pub fn query(store: &AppStore) -> String {
    store.query().get()
}

pub fn set_query(store: &AppStore, query: String) {
    store.query().set(query);
}

pub fn card_effect(store: &AppStore, card_id: CardId) -> Option<CardEffect> {
    store.effects().read().get(&card_id).copied()
}

pub fn set_card_effect(store: &AppStore, card_id: CardId, effect: CardEffect) {
    store.effects().write().insert(card_id, effect);
}

/// Clear `effect` from a card unless something newer replaced it
pub fn clear_card_effect(store: &AppStore, card_id: CardId, effect: CardEffect) {
    let current = store.effects().read_untracked().get(&card_id).copied();
    if current == Some(effect) {
        store.effects().write().remove(&card_id);
    }
}

pub fn is_item_leaving(store: &AppStore, item_id: ItemId) -> bool {
    store.leaving_items().read().contains(&item_id)
}

/// A save of this card is in flight after it left edit mode (tracked)
pub fn is_flushing(store: &AppStore, card_id: CardId) -> bool {
    store.flushing().read().contains_key(&card_id)
}

pub fn is_flushing_untracked(store: &AppStore, card_id: CardId) -> bool {
    store.flushing().read_untracked().contains_key(&card_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_count_tracks_overlapping_saves() {
        let mut state = AppState::default();
        assert!(!state.flushing.contains_key(&4));
        state.begin_flush(4);
        state.begin_flush(4);
        state.end_flush(4);
        assert!(state.flushing.contains_key(&4), "one save still in flight");
        state.end_flush(4);
        assert!(!state.flushing.contains_key(&4));
        assert!(state.flushing.is_empty());
    }

    #[test]
    fn test_end_flush_without_begin_is_harmless() {
        let mut state = AppState::default();
        state.end_flush(9);
        assert!(!state.flushing.contains_key(&9));
    }
}
