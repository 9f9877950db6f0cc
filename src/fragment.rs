//! Server Markup Reader
//!
//! Turns the server-rendered board and the HTML fragments returned by
//! create/update calls into model records. Markup contract:
//! - column: `.col[data-col]`, name in `data-col-name` or first heading
//! - card: `.card[data-card]`, `strong` title, optional `.muted` notes, optional `.due`
//! - checklist item: `li[data-item-id]`, `.check-btn` glyph ☑/☐, `.checklist-text`

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTemplateElement};

use crate::error::FragmentError;
use crate::models::{Board, Card, ChecklistItem, Column};

const COLUMN_SELECTOR: &str = ".col[data-col]";
const CARD_SELECTOR: &str = "[data-card]";
const ITEM_SELECTOR: &str = "li[data-item-id]";
const CHECKED_GLYPH: char = '☑';

// ========================
// Fragments
// ========================

/// Parse a single-card fragment (create/update responses)
pub fn parse_card(html: &str) -> Result<Card, FragmentError> {
    let root = parse_fragment(html)?;
    let el = if root.has_attribute("data-card") {
        root
    } else {
        first_match(&root, CARD_SELECTOR)?.ok_or(FragmentError::Missing("card element"))?
    };
    read_card(&el)
}

/// Parse a single checklist `<li>` fragment
pub fn parse_item(html: &str) -> Result<ChecklistItem, FragmentError> {
    let root = parse_fragment(html)?;
    let el = if root.has_attribute("data-item-id") {
        root
    } else {
        first_match(&root, ITEM_SELECTOR)?.ok_or(FragmentError::Missing("checklist item"))?
    };
    read_item(&el)
}

/// First element of an HTML snippet, parsed inert through a `<template>`
fn parse_fragment(html: &str) -> Result<Element, FragmentError> {
    if html.trim().is_empty() {
        return Err(FragmentError::Empty);
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(FragmentError::Parse)?;
    let template: HtmlTemplateElement = document
        .create_element("template")
        .map_err(|_| FragmentError::Parse)?
        .dyn_into()
        .map_err(|_| FragmentError::Parse)?;
    template.set_inner_html(html.trim());
    template.content().first_element_child().ok_or(FragmentError::Empty)
}

// ========================
// Server-rendered board
// ========================

/// Read every column (and its cards) below `root`
pub fn read_board(root: &Element) -> Result<Board, FragmentError> {
    let mut columns = Vec::new();
    for col in all_matches(root, COLUMN_SELECTOR)? {
        columns.push(read_column(&col)?);
    }
    Ok(Board { columns })
}

fn read_column(el: &Element) -> Result<Column, FragmentError> {
    let id = parse_id("data-col", el.get_attribute("data-col").as_deref())?;
    let name = match el.get_attribute("data-col-name") {
        Some(name) => name,
        None => first_match(el, "h1, h2, h3, .col-title")?
            .map(|h| strip_count(&text_of(&h)).to_string())
            .unwrap_or_else(|| format!("Column {}", id)),
    };
    let mut column = Column::new(id, name);
    for card_el in all_matches(el, CARD_SELECTOR)? {
        // Nested cards belong to their parent card, not the column
        let nested = card_el
            .parent_element()
            .and_then(|p| p.closest(CARD_SELECTOR).ok().flatten())
            .is_some();
        if !nested {
            column.cards.push(read_card(&card_el)?);
        }
    }
    Ok(column)
}

// ========================
// Element readers
// ========================

fn read_card(el: &Element) -> Result<Card, FragmentError> {
    let id = parse_id("data-card", el.get_attribute("data-card").as_deref())?;
    let title = first_match(el, "strong")?
        .map(|t| text_of(&t).trim().to_string())
        .ok_or(FragmentError::Missing("card title"))?;
    let notes = first_match(el, ".muted")?.map(|n| text_of(&n)).unwrap_or_default();
    let due = first_match(el, ".due")?
        .map(|d| text_of(&d).trim().to_string())
        .filter(|d| !d.is_empty());
    let mut checklist = Vec::new();
    for item_el in all_matches(el, ITEM_SELECTOR)? {
        checklist.push(read_item(&item_el)?);
    }
    Ok(Card {
        id,
        title,
        notes,
        due,
        checklist,
    })
}

fn read_item(el: &Element) -> Result<ChecklistItem, FragmentError> {
    let id = parse_id("data-item-id", el.get_attribute("data-item-id").as_deref())?;
    let text = first_match(el, ".checklist-text")?
        .map(|t| text_of(&t))
        .unwrap_or_else(|| text_of(el));
    let glyph = first_match(el, ".check-btn")?.map(|b| text_of(&b)).unwrap_or_default();
    let done = has_class(el, "checked")
        || is_checked_glyph(&glyph)
        || first_match(el, ".checklist-text.done")?.is_some();
    Ok(ChecklistItem {
        id,
        text: text.trim().to_string(),
        done,
    })
}

// ========================
// DOM helpers
// ========================

fn first_match(el: &Element, selector: &str) -> Result<Option<Element>, FragmentError> {
    el.query_selector(selector).map_err(|_| FragmentError::Parse)
}

fn all_matches(el: &Element, selector: &str) -> Result<Vec<Element>, FragmentError> {
    let nodes = el.query_selector_all(selector).map_err(|_| FragmentError::Parse)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_name().split_whitespace().any(|c| c == class)
}

// ========================
// Pure helpers
// ========================

fn parse_id(attr: &'static str, value: Option<&str>) -> Result<u32, FragmentError> {
    let value = value.ok_or(FragmentError::Missing(attr))?;
    value.trim().parse().map_err(|_| FragmentError::BadId {
        attr,
        value: value.to_string(),
    })
}

fn is_checked_glyph(text: &str) -> bool {
    text.contains(CHECKED_GLYPH)
}

/// `"Todo (3)"` → `"Todo"`
fn strip_count(heading: &str) -> &str {
    let heading = heading.trim();
    match heading.rfind('(') {
        Some(open) if heading.ends_with(')') && heading[open + 1..heading.len() - 1].chars().all(|c| c.is_ascii_digit()) => {
            heading[..open].trim_end()
        }
        _ => heading,
    }
}
