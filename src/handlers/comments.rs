use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::input::required_text;
use super::{card_at, JsonBody, PathParams};
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::CreateComment;
use crate::state::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64)>,
) -> Result<Json<Value>> {
    let card = card_at(&state, auth.user.id, ids).await?;
    let comments = state.comments.list_by_card(card.id).await?;
    Ok(Json(json!({ "comments": comments })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(ids), _): PathParams<(i64, i64, i64)>,
    WithRejection(Json(input), _): JsonBody<CreateComment>,
) -> Result<(StatusCode, Json<Value>)> {
    let content = required_text(&input.content, "Content is required")?;
    let card = card_at(&state, auth.user.id, ids).await?;

    let comment = state
        .comments
        .create(card.id, auth.user.id, &content)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

/// Only the author may delete; other board members get 403.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, list_id, card_id, comment_id)), _): PathParams<(
        i64,
        i64,
        i64,
        i64,
    )>,
) -> Result<StatusCode> {
    let card = card_at(&state, auth.user.id, (board_id, list_id, card_id)).await?;
    let comment = state
        .comments
        .find_on_card(comment_id, card.id)
        .await?
        .ok_or(AppError::NotFound("Comment not found"))?;

    if comment.author_id != auth.user.id {
        return Err(AppError::Forbidden);
    }

    state.comments.delete(comment.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
