//! Leptos DragDrop Utilities
//!
//! Native HTML5 drag-and-drop for Leptos lists.
//! Items are dragged between containers (targets); the drop position inside
//! a container is derived from the pointer against sibling midpoints.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Data-transfer format used to carry the dragged id
const DRAG_FORMAT: &str = "text/plain";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Item currently being dragged
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Container currently under the pointer
    pub over_target_read: ReadSignal<Option<u32>>,
    pub over_target_write: WriteSignal<Option<u32>>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (over_target_read, over_target_write) = signal(None::<u32>);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        over_target_read,
        over_target_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.over_target_write.set(None);
}

/// A completed drop: which item landed in which container, at which index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub item_id: u32,
    pub target_id: u32,
    pub index: usize,
}

/// Where an item lands among siblings, given their vertical midpoints
/// (in display order) and the pointer's y coordinate.
pub fn insertion_index(midpoints: &[f64], pointer_y: f64) -> usize {
    midpoints
        .iter()
        .position(|mid| pointer_y < *mid)
        .unwrap_or(midpoints.len())
}

/// Create dragstart handler for draggable items.
///
/// `can_drag` is consulted first; when it says no the gesture is cancelled.
pub fn make_on_dragstart<F>(dnd: DndSignals, item_id: u32, can_drag: F) -> impl Fn(web_sys::DragEvent) + Copy + 'static
where
    F: Fn() -> bool + Copy + 'static,
{
    move |ev: web_sys::DragEvent| {
        if !can_drag() {
            ev.prevent_default();
            return;
        }
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(DRAG_FORMAT, &item_id.to_string());
            dt.set_effect_allowed("move");
            // Use the dragged element itself as preview, anchored where it was grabbed
            if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                dt.set_drag_image(&el, ev.offset_x(), ev.offset_y());
            }
        }
        dnd.dragging_id_write.set(Some(item_id));
    }
}

/// Create dragover handler for containers (allows dropping, highlights target)
pub fn make_on_dragover(dnd: DndSignals, target_id: u32) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
        if dnd.over_target_read.get_untracked() != Some(target_id) {
            dnd.over_target_write.set(Some(target_id));
        }
    }
}

/// Create dragleave handler for containers
pub fn make_on_dragleave(dnd: DndSignals, target_id: u32) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        // Leaving into a child of the same container is not leaving
        let related = ev
            .related_target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        let current = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if let (Some(current), Some(related)) = (current, related) {
            if current.contains(Some(&related)) {
                return;
            }
        }
        if dnd.over_target_read.get_untracked() == Some(target_id) {
            dnd.over_target_write.set(None);
        }
    }
}

/// Create dragend handler for draggable items. Clears everything regardless of outcome.
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        end_drag(&dnd);
    }
}

/// Create drop handler for containers.
///
/// `item_selector` matches the sibling items inside the container and
/// `id_attr` is the attribute holding their id.
pub fn make_on_drop(
    dnd: DndSignals,
    target_id: u32,
    item_selector: &'static str,
    id_attr: &'static str,
    on_drop: Callback<DropAction>,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let dragged = dnd.dragging_id_read.get_untracked().or_else(|| {
            ev.data_transfer()
                .and_then(|dt| dt.get_data(DRAG_FORMAT).ok())
                .and_then(|s| s.trim().parse::<u32>().ok())
        });
        end_drag(&dnd);

        let Some(item_id) = dragged else { return };
        let index = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|container| {
                let mids = sibling_midpoints(&container, item_selector, id_attr, item_id);
                insertion_index(&mids, f64::from(ev.client_y()))
            })
            .unwrap_or(0);
        on_drop.run(DropAction { item_id, target_id, index });
    }
}

/// Vertical midpoints of the items in `container`, skipping the dragged one
fn sibling_midpoints(container: &web_sys::Element, item_selector: &str, id_attr: &str, skip_id: u32) -> Vec<f64> {
    let Ok(nodes) = container.query_selector_all(item_selector) else {
        return Vec::new();
    };
    let skip = skip_id.to_string();
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter(|el| el.get_attribute(id_attr).as_deref() != Some(skip.as_str()))
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            rect.top() + rect.height() / 2.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_index_empty_container() {
        assert_eq!(insertion_index(&[], 120.0), 0);
    }

    #[test]
    fn test_insertion_index_between_items() {
        let mids = [10.0, 50.0, 90.0];
        assert_eq!(insertion_index(&mids, 0.0), 0);
        assert_eq!(insertion_index(&mids, 30.0), 1);
        assert_eq!(insertion_index(&mids, 89.9), 2);
        assert_eq!(insertion_index(&mids, 200.0), 3);
    }
}
