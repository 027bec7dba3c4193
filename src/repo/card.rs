use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Card;
use crate::repo::position::{self, Scope};

#[derive(Clone)]
pub struct CardRepository {
    pool: Arc<SqlitePool>,
}

impl CardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Appends a card at the end of the list.
    pub async fn create(&self, list_id: i64, title: &str) -> Result<Card> {
        let pos = position::next_position(self.pool.as_ref(), Scope::Cards { list_id }).await?;

        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (list_id, title, position, archived, created_at)
            VALUES ($1, $2, $3, 0, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(list_id)
        .bind(title)
        .bind(pos)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    /// The card, if it sits in `list_id` and that list belongs to `board_id`.
    pub async fn find_on_list(&self, id: i64, list_id: i64, board_id: i64) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.* FROM cards c
            INNER JOIN lists l ON c.list_id = l.id
            WHERE c.id = $1 AND l.id = $2 AND l.board_id = $3
            "#,
        )
        .bind(id)
        .bind(list_id)
        .bind(board_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    /// Cards of a list by position; `archived` filters when given.
    pub async fn list_by_list(&self, list_id: i64, archived: Option<bool>) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT * FROM cards
            WHERE list_id = $1 AND ($2 IS NULL OR archived = $2)
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(list_id)
        .bind(archived)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    /// All cards on a board with the given archival state, grouped by list and
    /// ordered by position.
    pub async fn list_by_board(&self, board_id: i64, archived: bool) -> Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.* FROM cards c
            INNER JOIN lists l ON c.list_id = l.id
            WHERE l.board_id = $1 AND c.archived = $2
            ORDER BY c.list_id ASC, c.position ASC, c.id ASC
            "#,
        )
        .bind(board_id)
        .bind(archived)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    pub async fn update(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Card> {
        sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET title = $2,
                description = $3,
                due_date = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Card not found"))
    }

    /// Archival keeps the card's position in its list.
    pub async fn set_archived(&self, id: i64, archived: bool) -> Result<Card> {
        let archived_at = archived.then(Utc::now);

        sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET archived = $2,
                archived_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(archived)
        .bind(archived_at)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Card not found"))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Card not found"));
        }

        Ok(())
    }

    /// Re-parents the card to `target_list_id` at the end of that list and
    /// drops label links that do not belong to the target board. The source
    /// list is not renormalized.
    pub async fn move_to_list(&self, id: i64, target_list_id: i64) -> Result<Card> {
        let mut tx = self.pool.begin().await?;

        let pos = position::next_position(
            &mut *tx,
            Scope::Cards {
                list_id: target_list_id,
            },
        )
        .await?;

        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET list_id = $2, position = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(target_list_id)
        .bind(pos)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("Card not found"))?;

        // Labels are board-scoped; links to another board's labels go.
        sqlx::query(
            r#"
            DELETE FROM card_labels
            WHERE card_id = $1
              AND label_id NOT IN (
                  SELECT lb.id FROM labels lb
                  INNER JOIN lists l ON l.board_id = lb.board_id
                  WHERE l.id = $2
              )
            "#,
        )
        .bind(id)
        .bind(target_list_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(card)
    }

    pub async fn reorder(&self, list_id: i64, ordered_ids: &[i64]) -> Result<Vec<Card>> {
        position::reorder(self.pool.as_ref(), Scope::Cards { list_id }, ordered_ids).await?;
        self.list_by_list(list_id, None).await
    }
}
