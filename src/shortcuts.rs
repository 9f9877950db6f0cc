//! Keyboard Shortcuts
//!
//! Maps a key press plus the current selection/edit state to a board command.

use crate::models::CardId;

/// The parts of a keydown event the dispatcher cares about
#[derive(Clone, Copy, Debug)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    /// Focus is in an input, textarea, select or contenteditable
    pub in_text_field: bool,
    /// Focus is on a button or link
    pub on_button: bool,
    /// Ctrl, Meta or Alt held
    pub modified: bool,
}

/// Board state relevant to shortcuts
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyState {
    pub editing: bool,
    pub selected: Option<CardId>,
    pub column_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    /// Create a card in the first column and edit it
    NewCard,
    DeleteSelected(CardId),
    /// Move the selection to the top of the column at this 0-based ordinal
    MoveSelected { card_id: CardId, column: usize },
    EditSelected(CardId),
    CancelEdit,
}

pub fn dispatch(press: KeyPress<'_>, state: KeyState) -> Option<Shortcut> {
    if press.in_text_field || press.modified {
        return None;
    }
    match press.key {
        "n" | "N" => Some(Shortcut::NewCard),
        "Escape" if state.editing => Some(Shortcut::CancelEdit),
        _ if state.editing => None,
        "Delete" | "Backspace" => state.selected.map(Shortcut::DeleteSelected),
        // Enter on a focused button activates the button
        "Enter" if press.on_button => None,
        "Enter" => state.selected.map(Shortcut::EditSelected),
        key => {
            let card_id = state.selected?;
            let column = column_ordinal(key)?;
            (column < state.column_count).then_some(Shortcut::MoveSelected { card_id, column })
        }
    }
}

/// `"1"` → 0, ..., `"9"` → 8
fn column_ordinal(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || digit == 0 {
        return None;
    }
    Some(digit as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: &str) -> KeyPress<'_> {
        KeyPress {
            key,
            in_text_field: false,
            on_button: false,
            modified: false,
        }
    }

    fn selected(id: CardId) -> KeyState {
        KeyState {
            editing: false,
            selected: Some(id),
            column_count: 3,
        }
    }

    #[test]
    fn test_new_card_either_case() {
        assert_eq!(dispatch(press("n"), KeyState::default()), Some(Shortcut::NewCard));
        assert_eq!(dispatch(press("N"), KeyState::default()), Some(Shortcut::NewCard));
    }

    #[test]
    fn test_text_fields_and_modifiers_are_ignored() {
        let typing = KeyPress { in_text_field: true, ..press("n") };
        assert_eq!(dispatch(typing, selected(1)), None);
        let ctrl = KeyPress { modified: true, ..press("n") };
        assert_eq!(dispatch(ctrl, selected(1)), None);
    }

    #[test]
    fn test_delete_needs_selection() {
        assert_eq!(dispatch(press("Delete"), selected(4)), Some(Shortcut::DeleteSelected(4)));
        assert_eq!(dispatch(press("Backspace"), selected(4)), Some(Shortcut::DeleteSelected(4)));
        assert_eq!(dispatch(press("Delete"), KeyState::default()), None);
    }

    #[test]
    fn test_number_keys_move_to_existing_columns() {
        assert_eq!(
            dispatch(press("1"), selected(4)),
            Some(Shortcut::MoveSelected { card_id: 4, column: 0 })
        );
        assert_eq!(
            dispatch(press("3"), selected(4)),
            Some(Shortcut::MoveSelected { card_id: 4, column: 2 })
        );
        assert_eq!(dispatch(press("4"), selected(4)), None);
        assert_eq!(dispatch(press("0"), selected(4)), None);
        assert_eq!(dispatch(press("2"), KeyState::default()), None);
    }

    #[test]
    fn test_enter_edits_selection() {
        assert_eq!(dispatch(press("Enter"), selected(9)), Some(Shortcut::EditSelected(9)));
    }

    #[test]
    fn test_enter_on_focused_button_is_left_to_the_button() {
        let on_delete = KeyPress { on_button: true, ..press("Enter") };
        assert_eq!(dispatch(on_delete, selected(9)), None);
        // Other shortcuts still work with a button focused
        let digit = KeyPress { on_button: true, ..press("2") };
        assert_eq!(dispatch(digit, selected(9)), Some(Shortcut::MoveSelected { card_id: 9, column: 1 }));
    }

    #[test]
    fn test_editing_blocks_card_actions() {
        let editing = KeyState { editing: true, ..selected(4) };
        assert_eq!(dispatch(press("Delete"), editing), None);
        assert_eq!(dispatch(press("1"), editing), None);
        assert_eq!(dispatch(press("Enter"), editing), None);
        assert_eq!(dispatch(press("Escape"), editing), Some(Shortcut::CancelEdit));
        assert_eq!(dispatch(press("Escape"), selected(4)), None);
    }
}
