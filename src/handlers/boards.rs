use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::required_text;
use super::{JsonBody, PathParams};
use crate::auth::access::{accessible_board, owned_board};
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{BoardFull, CreateBoard, MoveTargets, UpdateBoard};
use crate::services::board_view;
use crate::state::AppState;

pub async fn list_boards(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Value>> {
    let boards = state.boards.list_accessible(auth.user.id).await?;
    Ok(Json(json!({ "boards": boards })))
}

pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(input), _): JsonBody<CreateBoard>,
) -> Result<(StatusCode, Json<Value>)> {
    let title = required_text(&input.title, "Title is required")?;
    let board = state.boards.create(&title, auth.user.id).await?;

    tracing::info!(board_id = board.id, owner_id = auth.user.id, "board created");

    Ok((StatusCode::CREATED, Json(json!({ "board": board }))))
}

pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<Value>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    Ok(Json(json!({ "board": board })))
}

pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<UpdateBoard>,
) -> Result<Json<Value>> {
    let title = required_text(&input.title, "Title is required")?;
    let board = owned_board(&state, board_id, auth.user.id).await?;

    let board = state.boards.update_title(board.id, &title).await?;
    Ok(Json(json!({ "board": board })))
}

pub async fn delete_board(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<StatusCode> {
    let board = owned_board(&state, board_id, auth.user.id).await?;
    state.boards.delete(board.id).await?;

    tracing::info!(board_id = board.id, "board deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Lists with their active cards and each card's labels.
pub async fn get_board_full(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<BoardFull>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    Ok(Json(board_view::load_board(&state, board, false).await?))
}

/// Same shape as the full view, archived cards only.
pub async fn get_board_archived(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<BoardFull>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    Ok(Json(board_view::load_board(&state, board, true).await?))
}

pub async fn get_move_targets(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<MoveTargets>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    Ok(Json(
        board_view::move_targets(&state, board.id, auth.user.id).await?,
    ))
}
