//! UI Components Module

mod board_view;
mod card_editor;
mod card_view;
mod checklist;
mod column_view;
mod delete_confirm_button;
mod toast_host;
mod toolbar;

pub use board_view::BoardView;
pub use card_editor::CardEditor;
pub use card_view::CardView;
pub use checklist::Checklist;
pub use column_view::ColumnView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use toast_host::ToastHost;
pub use toolbar::Toolbar;

/// `base` followed by every class whose flag is set
pub(crate) fn class_list(base: &str, flags: &[(&str, bool)]) -> String {
    let mut classes = base.to_string();
    for (class, on) in flags {
        if *on && !class.is_empty() {
            classes.push(' ');
            classes.push_str(class);
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list() {
        assert_eq!(class_list("card", &[]), "card");
        assert_eq!(
            class_list("card", &[("selected", true), ("dragging", false), ("card-enter", true)]),
            "card selected card-enter"
        );
        assert_eq!(class_list("card", &[("", true)]), "card");
    }
}
