//! Relocating cards between lists, on the same board or across boards.
//!
//! Both flavours append the card after the destination's current maximum
//! position and leave a gap behind in the source list.

use crate::auth::access::{accessible_board, card_on_list};
use crate::error::{AppError, Result};
use crate::models::{Card, List};
use crate::state::AppState;

/// Where a card currently lives, as addressed by the request path.
#[derive(Debug, Clone, Copy)]
pub struct CardLocation {
    pub board_id: i64,
    pub list_id: i64,
    pub card_id: i64,
}

pub async fn move_within_board(
    state: &AppState,
    user_id: i64,
    from: CardLocation,
    target_list_id: i64,
) -> Result<Card> {
    let board = accessible_board(state, from.board_id, user_id).await?;
    let card = card_on_list(state, board.id, from.list_id, from.card_id).await?;
    let target = target_list(state, board.id, target_list_id).await?;

    relocate(state, card, target).await
}

pub async fn move_across_boards(
    state: &AppState,
    user_id: i64,
    from: CardLocation,
    target_board_id: i64,
    target_list_id: i64,
) -> Result<Card> {
    let source_board = accessible_board(state, from.board_id, user_id).await?;
    let target_board = state
        .boards
        .find_accessible(target_board_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Target board not found"))?;

    state
        .lists
        .find_on_board(from.list_id, source_board.id)
        .await?
        .ok_or(AppError::NotFound("List not found"))?;
    let card = card_on_list(state, source_board.id, from.list_id, from.card_id).await?;
    let target = target_list(state, target_board.id, target_list_id).await?;

    relocate(state, card, target).await
}

async fn target_list(state: &AppState, board_id: i64, list_id: i64) -> Result<List> {
    state
        .lists
        .find_on_board(list_id, board_id)
        .await?
        .ok_or(AppError::NotFound("Target list not found"))
}

async fn relocate(state: &AppState, card: Card, target: List) -> Result<Card> {
    let moved = state.cards.move_to_list(card.id, target.id).await?;

    tracing::info!(
        card_id = moved.id,
        from_list = card.list_id,
        to_list = target.id,
        to_board = target.board_id,
        position = moved.position,
        "card moved"
    );

    Ok(moved)
}
