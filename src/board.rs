//! Board Operations
//!
//! Pure mutations over the in-memory board. Every mutation that can be
//! undone hands back what is needed to undo it.

use crate::edit::CardFields;
use crate::models::{Board, Card, CardId, ChecklistItem, Column, ColumnId, ItemId, Placement};
use crate::optimistic::Rollback;

impl Board {
    pub fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Column id at a 0-based ordinal (left to right)
    pub fn column_at(&self, ordinal: usize) -> Option<ColumnId> {
        self.columns.get(ordinal).map(|c| c.id)
    }

    pub fn first_column(&self) -> Option<ColumnId> {
        self.column_at(0)
    }

    pub fn locate(&self, card_id: CardId) -> Option<Placement> {
        self.columns.iter().enumerate().find_map(|(column, col)| {
            col.cards
                .iter()
                .position(|c| c.id == card_id)
                .map(|position| Placement { column, position })
        })
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.cards.iter_mut())
            .find(|c| c.id == card_id)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Insert a card into a column; position is clamped to the column length
    pub fn insert_card(&mut self, column_id: ColumnId, position: usize, card: Card) -> Option<Placement> {
        let column = self.column_index(column_id)?;
        let cards = &mut self.columns[column].cards;
        let position = position.min(cards.len());
        cards.insert(position, card);
        Some(Placement { column, position })
    }

    /// Put a removed card back where it was
    pub fn restore_card(&mut self, at: Placement, card: Card) {
        if let Some(col) = self.columns.get_mut(at.column) {
            let position = at.position.min(col.cards.len());
            col.cards.insert(position, card);
        }
    }

    pub fn remove_card(&mut self, card_id: CardId) -> Option<(Placement, Card)> {
        let at = self.locate(card_id)?;
        let card = self.columns[at.column].cards.remove(at.position);
        Some((at, card))
    }

    /// Move a card to `position` among the target column's other cards.
    /// Returns the placement it came from.
    pub fn move_card(&mut self, card_id: CardId, to: ColumnId, position: usize) -> Option<Placement> {
        self.column_index(to)?;
        let (from, card) = self.remove_card(card_id)?;
        self.insert_card(to, position, card);
        Some(from)
    }

    /// Move a card back to an exact previous placement
    pub fn move_card_to(&mut self, card_id: CardId, at: Placement) -> bool {
        match self.remove_card(card_id) {
            Some((_, card)) => {
                self.restore_card(at, card);
                true
            }
            None => false,
        }
    }

    /// Swap in a fresh record for an existing card, keeping its placement
    pub fn replace_card(&mut self, card: Card) -> Option<Card> {
        let slot = self.card_mut(card.id)?;
        Some(std::mem::replace(slot, card))
    }

    /// Card holding a checklist item, and the item's index in it
    pub fn find_item(&self, item_id: ItemId) -> Option<(CardId, usize)> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find_map(|card| {
                card.checklist
                    .iter()
                    .position(|i| i.id == item_id)
                    .map(|idx| (card.id, idx))
            })
    }

    /// Flip an item; returns its new state
    pub fn toggle_item(&mut self, item_id: ItemId) -> Option<bool> {
        let (card_id, idx) = self.find_item(item_id)?;
        let item = self.card_mut(card_id)?.checklist.get_mut(idx)?;
        item.done = !item.done;
        Some(item.done)
    }

    pub fn set_item_done(&mut self, item_id: ItemId, done: bool) -> bool {
        let Some((card_id, idx)) = self.find_item(item_id) else {
            return false;
        };
        match self.card_mut(card_id).and_then(|c| c.checklist.get_mut(idx)) {
            Some(item) => {
                item.done = done;
                true
            }
            None => false,
        }
    }

    pub fn push_item(&mut self, card_id: CardId, item: ChecklistItem) -> bool {
        match self.card_mut(card_id) {
            Some(card) => {
                card.checklist.push(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, item_id: ItemId) -> Option<(CardId, usize, ChecklistItem)> {
        let (card_id, idx) = self.find_item(item_id)?;
        let item = self.card_mut(card_id)?.checklist.remove(idx);
        Some((card_id, idx, item))
    }
}

// ========================
// Undoable mutations
// ========================

impl Board {
    /// `move_card`, paired with the move back. A no-op rollback means nothing moved.
    pub fn move_card_undoable(&mut self, card_id: CardId, to: ColumnId, position: usize) -> Rollback<Board> {
        match self.move_card(card_id, to, position) {
            Some(from) => Rollback::new(move |b: &mut Board| {
                b.move_card_to(card_id, from);
            }),
            None => Rollback::noop(),
        }
    }

    /// Show new title/notes on a card, paired with restoring the old ones
    pub fn set_fields_undoable(&mut self, card_id: CardId, fields: &CardFields) -> Rollback<Board> {
        let Some(card) = self.card_mut(card_id) else {
            return Rollback::noop();
        };
        let before = CardFields::from_card(card);
        fields.apply_to(card);
        Rollback::new(move |b: &mut Board| {
            if let Some(card) = b.card_mut(card_id) {
                before.apply_to(card);
            }
        })
    }

    /// `toggle_item`, paired with flipping it back
    pub fn toggle_item_undoable(&mut self, item_id: ItemId) -> Rollback<Board> {
        match self.toggle_item(item_id) {
            Some(done) => Rollback::new(move |b: &mut Board| {
                b.set_item_done(item_id, !done);
            }),
            None => Rollback::noop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::edit::CardFields;
    use crate::models::{Board, Card, ChecklistItem, Column, Placement};
    use crate::optimistic::settle;

    fn item(id: u32, done: bool) -> ChecklistItem {
        ChecklistItem { id, text: format!("Item {}", id), done }
    }

    fn sample_board() -> Board {
        let mut todo = Column::new(1, "Todo");
        todo.cards = vec![Card::new(10, "Fix bug"), Card::new(11, "Write docs")];
        let mut doing = Column::new(2, "Doing");
        let mut card = Card::new(20, "Release");
        card.checklist = vec![item(100, true), item(101, false), item(102, false)];
        doing.cards = vec![card];
        let done = Column::new(3, "Done");
        Board { columns: vec![todo, doing, done] }
    }

    fn counts(board: &Board) -> Vec<String> {
        board.columns.iter().map(|c| c.count_label()).collect()
    }

    #[test]
    fn test_locate_and_lookup() {
        let board = sample_board();
        assert_eq!(board.locate(11), Some(Placement { column: 0, position: 1 }));
        assert_eq!(board.locate(20), Some(Placement { column: 1, position: 0 }));
        assert_eq!(board.card(20).map(|c| c.title.as_str()), Some("Release"));
        assert!(board.locate(999).is_none());
        assert_eq!(board.first_column(), Some(1));
        assert_eq!(board.column_at(2), Some(3));
        assert_eq!(board.column_at(3), None);
    }

    #[test]
    fn test_move_between_columns_updates_counts() {
        let mut board = sample_board();
        let from = board.move_card(10, 3, 0).unwrap();
        assert_eq!(from, Placement { column: 0, position: 0 });
        assert_eq!(counts(&board), vec!["(1)", "(1)", "(1)"]);
        assert_eq!(board.locate(10), Some(Placement { column: 2, position: 0 }));
        assert_eq!(board.card_count(), 3);
    }

    #[test]
    fn test_move_within_column_reorders() {
        let mut board = sample_board();
        board.move_card(10, 1, 5).unwrap();
        let ids: Vec<u32> = board.columns[0].cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 10]);
    }

    #[test]
    fn test_move_to_unknown_column_leaves_board_untouched() {
        let mut board = sample_board();
        let before = board.clone();
        assert!(board.move_card(10, 42, 0).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_back_restores_order() {
        let mut board = sample_board();
        let before = board.clone();
        let from = board.move_card(11, 2, 0).unwrap();
        assert!(board.move_card_to(11, from));
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_and_restore_card() {
        let mut board = sample_board();
        let before = board.clone();
        let (at, card) = board.remove_card(10).unwrap();
        assert_eq!(counts(&board)[0], "(1)");
        board.restore_card(at, card);
        assert_eq!(board, before);
    }

    #[test]
    fn test_replace_card_keeps_position() {
        let mut board = sample_board();
        let fresh = Card::new(10, "Fix bug").with_notes("urgent");
        let old = board.replace_card(fresh).unwrap();
        assert_eq!(old.notes, "");
        assert_eq!(board.locate(10), Some(Placement { column: 0, position: 0 }));
        assert_eq!(board.card(10).unwrap().notes, "urgent");
    }

    #[test]
    fn test_toggle_item_recomputes_progress() {
        let mut board = sample_board();
        assert_eq!(board.card(20).unwrap().progress().label(), "1/3");
        assert_eq!(board.toggle_item(101), Some(true));
        let progress = board.card(20).unwrap().progress();
        assert_eq!(progress.label(), "2/3");
        assert!((progress.percent() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_remove_item_recomputes_progress() {
        let mut board = sample_board();
        let (card_id, idx, removed) = board.remove_item(100).unwrap();
        assert_eq!((card_id, idx), (20, 0));
        assert!(removed.done);
        assert_eq!(board.card(20).unwrap().progress().label(), "0/2");
        assert!(board.find_item(100).is_none());
    }

    #[test]
    fn test_new_card_lands_on_top_of_first_column() {
        let mut board = sample_board();
        let first = board.first_column().unwrap();
        let at = board.insert_card(first, 0, Card::new(30, "New Card")).unwrap();
        assert_eq!(at, Placement { column: 0, position: 0 });
        let ids: Vec<u32> = board.columns[0].cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![30, 10, 11]);
        assert_eq!(board.columns[0].count_label(), "(3)");
    }

    #[test]
    fn test_failed_toggle_fully_reverts() {
        let mut board = sample_board();
        let before = board.clone();
        let rollback = board.toggle_item_undoable(101);
        assert_eq!(board.card(20).unwrap().progress().label(), "2/3");

        let outcome: Result<(), &str> = settle(&mut board, rollback, Err("offline"));
        assert!(outcome.is_err());
        assert_eq!(board, before);
        assert_eq!(board.card(20).unwrap().progress().label(), "1/3");
    }

    #[test]
    fn test_toggle_unknown_item_is_noop() {
        let mut board = sample_board();
        assert!(board.toggle_item_undoable(999).is_noop());
        assert_eq!(board, sample_board());
    }

    #[test]
    fn test_failed_move_returns_card_and_counts() {
        let mut board = sample_board();
        let before = board.clone();
        let rollback = board.move_card_undoable(11, 3, 0);
        assert_eq!(counts(&board), vec!["(1)", "(1)", "(1)"]);

        let _ = settle::<_, (), _>(&mut board, rollback, Err(()));
        assert_eq!(board, before);
        assert_eq!(counts(&board), vec!["(2)", "(1)", "(0)"]);
        assert!(board.move_card_undoable(11, 42, 0).is_noop());
    }

    #[test]
    fn test_switch_flush_shows_draft_then_reverts_on_failure() {
        let mut board = sample_board();
        let draft = CardFields::new("Fix bug today", "urgent");

        let rollback = board.set_fields_undoable(10, &draft);
        assert_eq!(board.card(10).unwrap().title, "Fix bug today");
        let _ = settle::<_, (), _>(&mut board, rollback, Err(()));
        assert_eq!(board.card(10).unwrap().title, "Fix bug");
        assert_eq!(board.card(10).unwrap().notes, "");

        let rollback = board.set_fields_undoable(10, &draft);
        let kept: Result<(), ()> = settle(&mut board, rollback, Ok(()));
        assert!(kept.is_ok());
        assert_eq!(board.card(10).unwrap().notes, "urgent");
        assert!(board.set_fields_undoable(999, &draft).is_noop());
    }

    #[test]
    fn test_push_first_item_on_empty_card() {
        let mut board = sample_board();
        assert_eq!(board.card(10).unwrap().progress().percent(), 0.0);
        assert!(board.push_item(10, item(200, false)));
        assert_eq!(board.card(10).unwrap().progress().label(), "0/1");
        assert!(!board.push_item(999, item(201, false)));
    }
}
