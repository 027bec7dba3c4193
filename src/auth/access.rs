//! Board access resolution.
//!
//! A board is *accessible* to its owner and to every user holding a membership
//! row; it is *owned* only by `boards.owner_id`. Both checks, and the lookups of
//! resources nested under a board, fail with [`AppError::NotFound`] so that
//! non-members cannot probe which ids exist.

use crate::error::{AppError, Result};
use crate::models::{Board, Card, Label, List};
use crate::state::AppState;

/// Owner or member. Gates every list, card, label, checklist and comment route.
pub async fn accessible_board(state: &AppState, board_id: i64, user_id: i64) -> Result<Board> {
    state
        .boards
        .find_accessible(board_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Board not found"))
}

/// Owner only. Gates rename, delete, invite and member removal.
pub async fn owned_board(state: &AppState, board_id: i64, user_id: i64) -> Result<Board> {
    state
        .boards
        .find_owned(board_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Board not found"))
}

pub async fn list_on_board(state: &AppState, board_id: i64, list_id: i64) -> Result<List> {
    state
        .lists
        .find_on_board(list_id, board_id)
        .await?
        .ok_or(AppError::NotFound("List not found"))
}

pub async fn card_on_list(
    state: &AppState,
    board_id: i64,
    list_id: i64,
    card_id: i64,
) -> Result<Card> {
    state
        .cards
        .find_on_list(card_id, list_id, board_id)
        .await?
        .ok_or(AppError::NotFound("Card not found"))
}

pub async fn label_on_board(state: &AppState, board_id: i64, label_id: i64) -> Result<Label> {
    state
        .labels
        .find_on_board(label_id, board_id)
        .await?
        .ok_or(AppError::NotFound("Label not found"))
}
