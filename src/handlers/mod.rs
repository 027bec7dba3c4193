pub mod auth;
pub mod boards;
pub mod cards;
pub mod checklist;
pub mod comments;
pub mod health;
mod input;
pub mod invites;
pub mod labels;
pub mod lists;

use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;

use crate::auth::access::{accessible_board, card_on_list};
use crate::error::{AppError, Result};
use crate::models::Card;
use crate::state::AppState;

/// JSON body whose rejection renders as `{ "message": ... }`.
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

/// Path parameters whose rejection renders as `{ "message": ... }`.
pub type PathParams<T> = WithRejection<Path<T>, AppError>;

/// A card addressed as `(board_id, list_id, card_id)` on a board the user can access.
async fn card_at(
    state: &AppState,
    user_id: i64,
    (board_id, list_id, card_id): (i64, i64, i64),
) -> Result<Card> {
    let board = accessible_board(state, board_id, user_id).await?;
    card_on_list(state, board.id, list_id, card_id).await
}
