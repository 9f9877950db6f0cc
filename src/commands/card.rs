//! Card Commands
//!
//! Frontend bindings for card endpoints.

use serde::Serialize;

use super::{form_encode, send, Body};
use crate::edit::CardFields;
use crate::error::ApiError;
use crate::fragment;
use crate::models::{Card, CardId, ColumnId};

// ========================
// Argument Structs
// ========================

#[derive(Serialize, Debug, PartialEq)]
pub(crate) struct MoveCardArgs {
    pub column_id: ColumnId,
    pub position: usize,
}

// ========================
// Commands
// ========================

/// `POST /cards`; answers with the new card's fragment
pub async fn create_card(column_id: ColumnId, title: &str, notes: &str) -> Result<Card, ApiError> {
    let column = column_id.to_string();
    let body = form_encode(&[("column_id", &column), ("title", title), ("notes", notes)]);
    let html = send("POST", "/cards", Body::Form(body)).await?;
    Ok(fragment::parse_card(&html)?)
}

/// `PUT /cards/{id}`; answers with the refreshed card's fragment
pub async fn update_card(id: CardId, fields: &CardFields) -> Result<Card, ApiError> {
    let body = form_encode(&[("title", &fields.title), ("notes", &fields.notes)]);
    let html = send("PUT", &format!("/cards/{}", id), Body::Form(body)).await?;
    Ok(fragment::parse_card(&html)?)
}

pub async fn delete_card(id: CardId) -> Result<(), ApiError> {
    send("DELETE", &format!("/cards/{}", id), Body::Empty).await?;
    Ok(())
}

pub async fn move_card(id: CardId, column_id: ColumnId, position: usize) -> Result<(), ApiError> {
    let body = serde_json::to_string(&MoveCardArgs { column_id, position })?;
    send("POST", &format!("/move/{}", id), Body::Json(body)).await?;
    Ok(())
}
