use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};

use super::{JsonBody, PathParams};
use crate::auth::access::{accessible_board, owned_board};
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{normalize_email, InviteMember};
use crate::services::membership;
use crate::state::AppState;

pub async fn invite_member(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<InviteMember>,
) -> Result<(StatusCode, Json<Value>)> {
    let email = normalize_email(&input.email);
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let board = owned_board(&state, board_id, auth.user.id).await?;
    let invite = membership::invite(&state, &board, auth.user.id, &email).await?;

    Ok((StatusCode::CREATED, Json(json!({ "invite": invite }))))
}

/// Pending invites addressed to the caller.
pub async fn list_invites(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Value>> {
    let invites = state.invites.list_for_invitee(auth.user.id).await?;
    Ok(Json(json!({ "invites": invites })))
}

pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(invite_id), _): PathParams<i64>,
) -> Result<Json<Value>> {
    let board = membership::accept(&state, invite_id, auth.user.id).await?;
    Ok(Json(json!({ "board": board })))
}

pub async fn decline_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(invite_id), _): PathParams<i64>,
) -> Result<StatusCode> {
    membership::decline(&state, invite_id, auth.user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(board_id), _): PathParams<i64>,
) -> Result<Json<Value>> {
    let board = accessible_board(&state, board_id, auth.user.id).await?;
    let members = membership::list_members(&state, &board).await?;
    Ok(Json(json!({ "members": members })))
}

pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path((board_id, user_id)), _): PathParams<(i64, i64)>,
) -> Result<StatusCode> {
    let board = owned_board(&state, board_id, auth.user.id).await?;
    membership::remove_member(&state, &board, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
