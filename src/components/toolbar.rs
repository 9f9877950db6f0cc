//! Toolbar Component
//!
//! Search box and shortcut hints above the board.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::debounce::Debouncer;
use crate::store::set_query;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let search = Debouncer::new(ctx.config(|c| c.search_delay_ms));

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        search.call(move || set_query(&store, value));
    };

    view! {
        <div class="toolbar">
            <input
                type="search"
                class="search-input"
                placeholder="Search cards"
                on:input=on_input
            />
            <span class="shortcut-hint">
                "n new · Enter edit · Esc cancel · Del delete · 1-9 move"
            </span>
        </div>
    }
}
