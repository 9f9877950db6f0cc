//! Kanban Board Frontend Entry Point

mod actions;
mod app;
mod board;
mod commands;
mod components;
mod config;
mod context;
mod debounce;
mod dom;
mod edit;
mod error;
mod fragment;
mod logging;
mod models;
mod optimistic;
mod search;
mod shortcuts;
mod store;
mod toast;

use app::App;
use config::UiConfig;
use leptos::mount::mount_to;
use leptos::prelude::*;
use models::Board;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Server-rendered board the app takes over
const BOARD_ROOT_SELECTOR: &str = "#board, [data-board]";

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match UiConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (UiConfig::default(), Some(e)),
    };
    logging::init(config.log_level());
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    commands::configure(config.clone());

    let root = board_root();
    let board = match root.as_ref().map(fragment::read_board) {
        Some(Ok(board)) => board,
        Some(Err(e)) => {
            log::error!("Could not read board markup: {}", e);
            Board::default()
        }
        None => {
            log::warn!("No board element found, starting empty");
            Board::default()
        }
    };

    match root.and_then(|r| r.dyn_into::<HtmlElement>().ok()) {
        Some(root) => {
            // The model now owns the board; the server markup goes away
            root.set_inner_html("");
            mount_to(root, move || view! { <App board=board config=config /> }).forget();
        }
        None => mount_to_body(move || view! { <App board=board config=config /> }),
    }
}

fn board_root() -> Option<Element> {
    web_sys::window()?
        .document()?
        .query_selector(BOARD_ROOT_SELECTOR)
        .ok()
        .flatten()
}
