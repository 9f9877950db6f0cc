//! Frontend Models
//!
//! Data structures the board view renders from.

use serde::{Deserialize, Serialize};

pub type CardId = u32;
pub type ColumnId = u32;
pub type ItemId = u32;

/// Checklist line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
}

/// Card data structure (matches server fragment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Card {
    pub fn progress(&self) -> Progress {
        Progress {
            done: self.checklist.iter().filter(|item| item.done).count(),
            total: self.checklist.len(),
        }
    }
}

#[cfg(test)]
impl Card {
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            notes: String::new(),
            due: None,
            checklist: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A column; card order is display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Header count label, e.g. `(3)`
    pub fn count_label(&self) -> String {
        format!("({})", self.cards.len())
    }
}

/// The whole board, columns in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

/// Where a card sits: column index and position inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: usize,
    pub position: usize,
}

/// Checklist progress for one card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction label, e.g. `2/3`
    pub fn label(&self) -> String {
        format!("{}/{}", self.done, self.total)
    }

    /// Fill width in percent
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 * 100.0 / self.total as f64
        }
    }
}
