//! Read models: the nested board view and the cross-board move picker.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{
    Board, BoardFull, Card, CardLabel, CardWithLabels, Label, List, ListWithCards, MoveTarget,
    MoveTargets,
};
use crate::state::AppState;

/// Board → lists (by position) → cards with the given archival state (by
/// position) → labels. Three queries regardless of board size.
pub async fn load_board(state: &AppState, board: Board, archived: bool) -> Result<BoardFull> {
    let lists = state.lists.list_by_board(board.id).await?;
    let cards = state.cards.list_by_board(board.id, archived).await?;
    let links = state.labels.list_card_links_for_board(board.id).await?;

    Ok(assemble(board, lists, cards, links))
}

fn assemble(board: Board, lists: Vec<List>, cards: Vec<Card>, links: Vec<CardLabel>) -> BoardFull {
    let mut labels_by_card: HashMap<i64, Vec<Label>> = HashMap::new();
    for link in links {
        labels_by_card.entry(link.card_id).or_default().push(link.label);
    }

    let mut cards_by_list: HashMap<i64, Vec<CardWithLabels>> = HashMap::new();
    for card in cards {
        let labels = labels_by_card.remove(&card.id).unwrap_or_default();
        cards_by_list
            .entry(card.list_id)
            .or_default()
            .push(card.with_labels(labels));
    }

    let lists = lists
        .into_iter()
        .map(|list| {
            let cards = cards_by_list.remove(&list.id).unwrap_or_default();
            ListWithCards { list, cards }
        })
        .collect();

    BoardFull { board, lists }
}

/// Every list of every board the user can access, with the current board's
/// lists first and the remaining boards in creation order.
pub async fn move_targets(state: &AppState, current_board_id: i64, user_id: i64) -> Result<MoveTargets> {
    let boards = state.boards.list_accessible(user_id).await?;
    let lists = state.lists.list_accessible(user_id).await?;

    let mut lists_by_board: HashMap<i64, Vec<List>> = HashMap::new();
    for list in lists {
        lists_by_board.entry(list.board_id).or_default().push(list);
    }

    let mut targets = Vec::new();
    for entry in current_first(boards, |b| b.board.id == current_board_id) {
        for list in lists_by_board.remove(&entry.board.id).unwrap_or_default() {
            targets.push(MoveTarget {
                board_id: entry.board.id,
                board_title: entry.board.title.clone(),
                list_id: list.id,
                list_title: list.title,
            });
        }
    }

    Ok(MoveTargets {
        current_board_id,
        targets,
    })
}

/// Moves the first matching item to the front, keeping the others in order.
pub fn current_first<T>(mut items: Vec<T>, is_current: impl Fn(&T) -> bool) -> Vec<T> {
    if let Some(index) = items.iter().position(is_current) {
        let current = items.remove(index);
        items.insert(0, current);
    }
    items
}
