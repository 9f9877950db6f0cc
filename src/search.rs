//! Search Filter
//!
//! Client-side, case-insensitive substring filter over rendered cards.

use crate::models::Card;

/// Normalized query; `None` means no filtering
pub fn normalize(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Whether a card stays visible for an already-normalized query
pub fn matches(card: &Card, needle: &str) -> bool {
    card.title.to_lowercase().contains(needle) || card.notes.to_lowercase().contains(needle)
}

/// Whether a card is visible for a raw query
pub fn is_visible(card: &Card, query: &str) -> bool {
    match normalize(query) {
        Some(needle) => matches(card, &needle),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<Card> {
        vec![
            Card::new(1, "Fix BUG in parser"),
            Card::new(2, "Write docs").with_notes("mention the debug flag"),
            Card::new(3, "Release").with_notes("after QA"),
        ]
    }

    #[test]
    fn test_filters_title_and_notes_case_insensitively() {
        let visible: Vec<u32> = cards()
            .iter()
            .filter(|c| is_visible(c, "bug"))
            .map(|c| c.id)
            .collect();
        assert_eq!(visible, vec![1, 2]);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        assert!(cards().iter().all(|c| is_visible(c, "")));
        assert!(cards().iter().all(|c| is_visible(c, "   ")));
        assert_eq!(normalize("  "), None);
    }

    #[test]
    fn test_query_is_trimmed_and_lowercased() {
        assert_eq!(normalize("  QA "), Some("qa".to_string()));
        assert!(is_visible(&cards()[2], " qa"));
        assert!(!is_visible(&cards()[0], "qa"));
    }
}
