//! Invite / accept / decline workflow and member management.
//!
//! Callers resolve the board first (owner-only for invite and removal);
//! acceptance and decline are scoped to the invitee instead.

use crate::error::{AppError, Result};
use crate::models::{Board, BoardInvite, BoardRole, MemberResponse};
use crate::state::AppState;

pub async fn invite(
    state: &AppState,
    board: &Board,
    inviter_id: i64,
    email: &str,
) -> Result<BoardInvite> {
    let invitee = state
        .users
        .find_by_email(email)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    if invitee.id == inviter_id || invitee.id == board.owner_id {
        return Err(AppError::BadRequest("You cannot invite yourself".to_string()));
    }

    if state.members.is_member(board.id, invitee.id).await? {
        return Err(AppError::BadRequest(
            "User is already a member of this board".to_string(),
        ));
    }

    let invite = state.invites.upsert(board.id, inviter_id, invitee.id).await?;

    tracing::info!(
        board_id = board.id,
        invite_id = invite.id,
        invitee_id = invitee.id,
        "board invite issued"
    );

    Ok(invite)
}

/// Accepts an invite addressed to `user_id` and returns the board it grants.
pub async fn accept(state: &AppState, invite_id: i64, user_id: i64) -> Result<Board> {
    let member = state.invites.accept(invite_id, user_id).await?;

    tracing::info!(
        board_id = member.board_id,
        user_id,
        invite_id,
        "board invite accepted"
    );

    state
        .boards
        .find_by_id(member.board_id)
        .await?
        .ok_or(AppError::NotFound("Board not found"))
}

pub async fn decline(state: &AppState, invite_id: i64, user_id: i64) -> Result<()> {
    state.invites.decline(invite_id, user_id).await?;
    tracing::info!(user_id, invite_id, "board invite declined");
    Ok(())
}

/// The owner first, then every member in join order.
pub async fn list_members(state: &AppState, board: &Board) -> Result<Vec<MemberResponse>> {
    let owner = state.users.get_by_id(board.owner_id).await?;

    let mut members = vec![MemberResponse {
        user_id: owner.id,
        email: owner.email,
        name: owner.name,
        role: BoardRole::Owner.to_string(),
        is_owner: true,
    }];

    members.extend(
        state
            .members
            .list_with_users(board.id, board.owner_id)
            .await?
            .into_iter()
            .map(MemberResponse::from),
    );

    Ok(members)
}

pub async fn remove_member(state: &AppState, board: &Board, user_id: i64) -> Result<()> {
    if user_id == board.owner_id {
        return Err(AppError::BadRequest(
            "Cannot remove the board owner".to_string(),
        ));
    }

    state.members.remove(board.id, user_id).await?;
    tracing::info!(board_id = board.id, user_id, "board member removed");
    Ok(())
}
