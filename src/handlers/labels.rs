use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::{optional_text, required_text};
use super::{JsonBody, PathParams};
use crate::auth::access::{accessible_board, label_on_board};
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{CreateLabel, UpdateLabel};
use crate::state::AppState;

pub async fn list_labels(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<Value>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let labels = state.labels.list_by_board(board.id).await?;
    Ok(Json(json!({ "labels": labels })))
}

pub async fn create_label(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<CreateLabel>,
) -> Result<(StatusCode, Json<Value>)> {
    let name = required_text(&input.name, "Name is required")?;
    let color = optional_text(input.color.as_deref());
    let board = accessible_board(&state, board_id, auth.user.id).await?;

    let label = state
        .labels
        .create(board.id, &name, color.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "label": label }))))
}

pub async fn update_label(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, label_id)), _): PathParams<(i64, i64)>,
    WithRejection(Json(input), _): JsonBody<UpdateLabel>,
) -> Result<Json<Value>> {
    let name = input
        .name
        .as_deref()
        .map(|n| required_text(n, "Name is required"))
        .transpose()?;
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let label = label_on_board(&state, board.id, label_id).await?;

    let name = name.unwrap_or(label.name);
    let color = match input.color {
        Some(color) => optional_text(color.as_deref()),
        None => label.color,
    };

    let label = state
        .labels
        .update(label.id, &name, color.as_deref())
        .await?;
    Ok(Json(json!({ "label": label })))
}

pub async fn delete_label(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, label_id)), _): PathParams<(i64, i64)>,
) -> Result<StatusCode> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let label = label_on_board(&state, board.id, label_id).await?;

    state.labels.delete(label.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
