//! Toast Host Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Fixed container rendering every live toast, oldest on top
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_app_context().toaster.toasts();

    view! {
        <div class="toast-container">
            <For
                each=move || toasts.with(|t| t.items().iter().map(|t| (t.id, t.message.clone())).collect::<Vec<_>>())
                key=|(id, _)| *id
                children=move |(id, message)| {
                    // Same element across phases so the CSS transition runs
                    let class = move || {
                        toasts.with(|t| t.items().iter().find(|t| t.id == id).map(|t| t.class()).unwrap_or_default())
                    };
                    view! { <div class=class role="status">{message}</div> }
                }
            />
        </div>
    }
}
