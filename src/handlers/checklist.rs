use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::{ordered_ids, required_text};
use super::{card_at, JsonBody, PathParams};
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{ChecklistItem, CreateChecklistItem, ReorderChecklist, UpdateChecklistItem};
use crate::state::AppState;

async fn resolve_item(
    state: &AppState,
    user_id: i64,
    (board_id, list_id, card_id, item_id): (i64, i64, i64, i64),
) -> Result<ChecklistItem> {
    let card = card_at(state, user_id, (board_id, list_id, card_id)).await?;
    state
        .checklists
        .find_on_card(item_id, card.id)
        .await?
        .ok_or(AppError::NotFound("Checklist item not found"))
}

pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64)>,
) -> Result<Json<Value>> {
    let card = card_at(&state, auth.user.id, ids).await?;
    let items = state.checklists.list_by_card(card.id).await?;
    Ok(Json(json!({ "items": items })))
}

pub async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64)>,
    WithRejection(Json(input), _): JsonBody<CreateChecklistItem>,
) -> Result<(StatusCode, Json<Value>)> {
    let text = required_text(&input.text, "Text is required")?;
    let card = card_at(&state, auth.user.id, ids).await?;

    let item = state.checklists.create(card.id, &text).await?;
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

pub async fn reorder_items(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64)>,
    WithRejection(Json(input), _): JsonBody<ReorderChecklist>,
) -> Result<Json<Value>> {
    let ordered = ordered_ids("orderedItemIds", input.ordered_item_ids)?;
    let card = card_at(&state, auth.user.id, ids).await?;

    let items = state.checklists.reorder(card.id, &ordered).await?;
    Ok(Json(json!({ "items": items })))
}

pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64, i64)>,
    WithRejection(Json(input), _): JsonBody<UpdateChecklistItem>,
) -> Result<Json<Value>> {
    if input.text.is_none() && input.done.is_none() {
        return Err(AppError::Validation("text or done is required".to_string()));
    }
    let text = input
        .text
        .as_deref()
        .map(|t| required_text(t, "Text is required"))
        .transpose()?;

    let item = resolve_item(&state, auth.user.id, ids).await?;

    let text = text.unwrap_or(item.text);
    let done = input.done.unwrap_or(item.done);

    let item = state.checklists.update(item.id, &text, done).await?;
    Ok(Json(json!({ "item": item })))
}

pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64, i64)>,
) -> Result<StatusCode> {
    let item = resolve_item(&state, auth.user.id, ids).await?;
    state.checklists.delete(item.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
