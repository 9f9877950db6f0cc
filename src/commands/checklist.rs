//! Checklist Commands
//!
//! Frontend bindings for checklist item endpoints.

use super::{form_encode, send, Body};
use crate::error::ApiError;
use crate::fragment;
use crate::models::{CardId, ChecklistItem, ItemId};

pub async fn toggle_item(id: ItemId) -> Result<(), ApiError> {
    send("POST", &format!("/toggle/{}", id), Body::Empty).await?;
    Ok(())
}

/// `POST /checklist/{card_id}`; answers with the new `<li>` fragment
pub async fn add_item(card_id: CardId, text: &str) -> Result<ChecklistItem, ApiError> {
    let body = form_encode(&[("text", text)]);
    let html = send("POST", &format!("/checklist/{}", card_id), Body::Form(body)).await?;
    Ok(fragment::parse_item(&html)?)
}

pub async fn delete_item(id: ItemId) -> Result<(), ApiError> {
    send("DELETE", &format!("/checklist-item/{}", id), Body::Empty).await?;
    Ok(())
}
