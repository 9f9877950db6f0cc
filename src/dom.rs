//! Browser Helpers
//!
//! Small wrappers around `web_sys` calls used by handlers.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement};

/// Blocking browser confirmation; `false` if the dialog cannot be shown
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn active_element() -> Option<Element> {
    web_sys::window()?.document()?.active_element()
}

/// Focus is inside an element matching `selector` (or that element itself)
pub fn focus_within(selector: &str) -> bool {
    active_element()
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Target accepts typing: input, textarea, select or contenteditable
pub fn is_text_field(target: Option<EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") || el.is_content_editable()
}

/// Target activates on Enter by itself: a button or link
pub fn is_button(target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "BUTTON" | "A"))
}

/// Run `f` once after `ms`
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    Timeout::new(ms, f).forget();
}
