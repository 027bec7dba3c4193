use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::{ordered_ids, required_text};
use super::{JsonBody, PathParams};
use crate::auth::access::{accessible_board, list_on_board};
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{CreateList, ReorderLists, UpdateList};
use crate::state::AppState;

pub async fn list_lists(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<Value>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let lists = state.lists.list_by_board(board.id).await?;
    Ok(Json(json!({ "lists": lists })))
}

pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<CreateList>,
) -> Result<(StatusCode, Json<Value>)> {
    let title = required_text(&input.title, "Title is required")?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;

    let list = state.lists.create(board.id, &title).await?;
    Ok((StatusCode::CREATED, Json(json!({ "list": list }))))
}

pub async fn reorder_lists(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<ReorderLists>,
) -> Result<Json<Value>> {
    let ids = ordered_ids("orderedListIds", input.ordered_list_ids)?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;

    let lists = state.lists.reorder(board.id, &ids).await?;
    tracing::info!(board_id = board.id, count = lists.len(), "lists reordered");

    Ok(Json(json!({ "lists": lists })))
}

pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id)), _): PathParams<(i64, i64)>,
    WithRejection(Json(input), _): JsonBody<UpdateList>,
) -> Result<Json<Value>> {
    let title = required_text(&input.title, "Title is required")?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let list = list_on_board(&state, board.id, list_id).await?;

    let list = state.lists.update_title(list.id, &title).await?;
    Ok(Json(json!({ "list": list })))
}

pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id)), _): PathParams<(i64, i64)>,
) -> Result<StatusCode> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let list = list_on_board(&state, board.id, list_id).await?;

    state.lists.delete(list.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
