use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::{as_id, due_date, id_set, ordered_ids, required_text};
use super::{card_at, JsonBody, PathParams};
use crate::auth::access::{accessible_board, card_on_list, list_on_board};
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{
    CardDetails, CreateCard, MoveCard, MoveCardToList, ReorderCards, SetCardLabels,
    UpdateCard,
};
use crate::services::mover::{self, CardLocation};
use crate::state::AppState;

type CardPath = PathParams<(i64, i64, i64)>;

/// Active cards of one list.
pub async fn list_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id)), _): PathParams<(i64, i64)>,
) -> Result<Json<Value>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let list = list_on_board(&state, board.id, list_id).await?;

    let cards = state.cards.list_by_list(list.id, Some(false)).await?;
    Ok(Json(json!({ "cards": cards })))
}

pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id)), _): PathParams<(i64, i64)>,
    WithRejection(Json(input), _): JsonBody<CreateCard>,
) -> Result<(StatusCode, Json<Value>)> {
    let title = required_text(&input.title, "Title is required")?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let list = list_on_board(&state, board.id, list_id).await?;

    let card = state.cards.create(list.id, &title).await?;
    Ok((StatusCode::CREATED, Json(json!({ "card": card }))))
}

pub async fn reorder_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id)), _): PathParams<(i64, i64)>,
    WithRejection(Json(input), _): JsonBody<ReorderCards>,
) -> Result<Json<Value>> {
    let ids = ordered_ids("orderedCardIds", input.ordered_card_ids)?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let list = list_on_board(&state, board.id, list_id).await?;

    let cards = state.cards.reorder(list.id, &ids).await?;
    tracing::info!(list_id = list.id, count = cards.len(), "cards reordered");

    Ok(Json(json!({ "cards": cards })))
}

/// Card with its labels, checklist and comments.
pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): CardPath,
) -> Result<Json<Value>> {
    let card = card_at(&state, auth.user.id, ids).await?;

    let labels = state.labels.list_for_card(card.id).await?;
    let checklist = state.checklists.list_by_card(card.id).await?;
    let comments = state.comments.list_by_card(card.id).await?;

    let details = CardDetails {
        card,
        labels,
        checklist,
        comments,
    };
    Ok(Json(json!({ "card": details })))
}

pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): CardPath,
    WithRejection(Json(input), _): JsonBody<UpdateCard>,
) -> Result<Json<Value>> {
    if input.title.is_none() && input.description.is_none() && input.due_date.is_none() {
        return Err(AppError::Validation(
            "title, description, or dueDate is required".to_string(),
        ));
    }

    let title = input
        .title
        .as_deref()
        .map(|t| required_text(t, "Title is required"))
        .transpose()?;
    let due = input
        .due_date
        .as_ref()
        .map(|d| due_date(d.as_deref()))
        .transpose()?;

    let card = card_at(&state, auth.user.id, ids).await?;

    let title = title.unwrap_or(card.title);
    let description = match input.description {
        Some(description) => description,
        None => card.description,
    };
    let due = due.unwrap_or(card.due_date);

    let card = state
        .cards
        .update(card.id, &title, description.as_deref(), due)
        .await?;
    Ok(Json(json!({ "card": card })))
}

pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): CardPath,
) -> Result<StatusCode> {
    let card = card_at(&state, auth.user.id, ids).await?;
    state.cards.delete(card.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Appends the card to another list of the same board.
pub async fn move_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id, card_id)), _): CardPath,
    WithRejection(Json(input), _): JsonBody<MoveCard>,
) -> Result<Json<Value>> {
    let target = input.target_list_id.filter(|v| !v.is_null()).ok_or_else(|| {
        AppError::Validation("targetListId is required".to_string())
    })?;
    let target_list_id = as_id(&target)
        .ok_or_else(|| AppError::Validation("targetListId must be a number".to_string()))?;

    let from = CardLocation {
        board_id,
        list_id,
        card_id,
    };
    let card = mover::move_within_board(&state, auth.user.id, from, target_list_id).await?;
    Ok(Json(json!({ "card": card })))
}

/// Appends the card to a list on any board the caller can access.
pub async fn move_card_to_list(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id, card_id)), _): CardPath,
    WithRejection(Json(input), _): JsonBody<MoveCardToList>,
) -> Result<Json<Value>> {
    let (Some(board), Some(list)) = (
        input.target_board_id.filter(|v| !v.is_null()),
        input.target_list_id.filter(|v| !v.is_null()),
    ) else {
        return Err(AppError::Validation(
            "targetBoardId and targetListId are required".to_string(),
        ));
    };
    let (Some(target_board_id), Some(target_list_id)) = (as_id(&board), as_id(&list)) else {
        return Err(AppError::Validation(
            "targetBoardId and targetListId must be numbers".to_string(),
        ));
    };

    let from = CardLocation {
        board_id,
        list_id,
        card_id,
    };
    let card =
        mover::move_across_boards(&state, auth.user.id, from, target_board_id, target_list_id)
            .await?;
    Ok(Json(json!({ "card": card })))
}

pub async fn archive_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): CardPath,
) -> Result<Json<Value>> {
    set_archived(&state, auth.user.id, ids, true).await
}

pub async fn unarchive_card(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): CardPath,
) -> Result<Json<Value>> {
    set_archived(&state, auth.user.id, ids, false).await
}

async fn set_archived(
    state: &AppState,
    user_id: i64,
    ids: (i64, i64, i64),
    archived: bool,
) -> Result<Json<Value>> {
    let card = card_at(state, user_id, ids).await?;
    let card = state.cards.set_archived(card.id, archived).await?;

    tracing::debug!(card_id = card.id, archived, "card archival changed");
    Ok(Json(json!({ "card": card })))
}

/// Replaces the card's labels with `labelIds`; an empty array clears them.
pub async fn set_card_labels(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id, card_id)), _): CardPath,
    WithRejection(Json(input), _): JsonBody<SetCardLabels>,
) -> Result<Json<Value>> {
    let label_ids = id_set("labelIds", input.label_ids)?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let card = card_on_list(&state, board.id, list_id, card_id).await?;

    let labels = state
        .labels
        .replace_for_card(card.id, board.id, &label_ids)
        .await?;
    Ok(Json(json!({ "card": card.with_labels(labels) })))
}
