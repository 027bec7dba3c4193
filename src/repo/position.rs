//! Sibling ordering for lists, cards and checklist items.
//!
//! Positions are zero-based integers scoped to a parent row. New rows are
//! appended at `MAX(position) + 1`, read from storage on every call. Deletes and
//! moves leave gaps; only [`reorder`] rewrites a scope to `0..n`, and it does so
//! in a single transaction.

use std::collections::HashSet;

use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Lists { board_id: i64 },
    Cards { list_id: i64 },
    ChecklistItems { card_id: i64 },
}

impl Scope {
    fn table(&self) -> &'static str {
        match self {
            Scope::Lists { .. } => "lists",
            Scope::Cards { .. } => "cards",
            Scope::ChecklistItems { .. } => "checklist_items",
        }
    }

    fn parent_column(&self) -> &'static str {
        match self {
            Scope::Lists { .. } => "board_id",
            Scope::Cards { .. } => "list_id",
            Scope::ChecklistItems { .. } => "card_id",
        }
    }

    fn parent_id(&self) -> i64 {
        match *self {
            Scope::Lists { board_id } => board_id,
            Scope::Cards { list_id } => list_id,
            Scope::ChecklistItems { card_id } => card_id,
        }
    }

    fn not_found(&self) -> &'static str {
        match self {
            Scope::Lists { .. } => "List not found",
            Scope::Cards { .. } => "Card not found",
            Scope::ChecklistItems { .. } => "Checklist item not found",
        }
    }
}

/// Position for a row appended to `scope`: one past the current maximum, or 0.
pub async fn next_position<'e, E>(executor: E, scope: Scope) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT MAX(position) FROM {} WHERE {} = $1",
        scope.table(),
        scope.parent_column()
    );

    let max_pos = sqlx::query_scalar::<_, Option<i64>>(&sql)
        .bind(scope.parent_id())
        .fetch_one(executor)
        .await?;

    Ok(max_pos.map_or(0, |p| p + 1))
}

/// Assigns `position = index` for every id in `ordered_ids`.
///
/// The ids must be exactly the current siblings in `scope`; anything else is
/// rejected with `NotFound` and nothing is written.
pub async fn reorder(pool: &SqlitePool, scope: Scope, ordered_ids: &[i64]) -> Result<()> {
    let mut tx = pool.begin().await?;

    let select = format!(
        "SELECT id FROM {} WHERE {} = $1",
        scope.table(),
        scope.parent_column()
    );
    let current: HashSet<i64> = sqlx::query_scalar::<_, i64>(&select)
        .bind(scope.parent_id())
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

    if !same_members(&current, ordered_ids) {
        return Err(AppError::NotFound(scope.not_found()));
    }

    let update = format!(
        "UPDATE {} SET position = $1 WHERE id = $2 AND {} = $3",
        scope.table(),
        scope.parent_column()
    );
    for (index, id) in ordered_ids.iter().enumerate() {
        sqlx::query(&update)
            .bind(index as i64)
            .bind(id)
            .bind(scope.parent_id())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::debug!(?scope, count = ordered_ids.len(), "reordered siblings");
    Ok(())
}

fn same_members(current: &HashSet<i64>, ordered_ids: &[i64]) -> bool {
    let supplied: HashSet<i64> = ordered_ids.iter().copied().collect();
    supplied.len() == ordered_ids.len() && supplied == *current
}
