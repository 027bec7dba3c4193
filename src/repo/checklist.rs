use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::ChecklistItem;
use crate::repo::position::{self, Scope};

#[derive(Clone)]
pub struct ChecklistRepository {
    pool: Arc<SqlitePool>,
}

impl ChecklistRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, card_id: i64, text: &str) -> Result<ChecklistItem> {
        let pos =
            position::next_position(self.pool.as_ref(), Scope::ChecklistItems { card_id }).await?;

        let item = sqlx::query_as::<_, ChecklistItem>(
            r#"
            INSERT INTO checklist_items (card_id, text, done, position, created_at)
            VALUES ($1, $2, 0, $3, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(card_id)
        .bind(text)
        .bind(pos)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(item)
    }

    pub async fn find_on_card(&self, id: i64, card_id: i64) -> Result<Option<ChecklistItem>> {
        let item = sqlx::query_as::<_, ChecklistItem>(
            "SELECT * FROM checklist_items WHERE id = $1 AND card_id = $2",
        )
        .bind(id)
        .bind(card_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(item)
    }

    pub async fn list_by_card(&self, card_id: i64) -> Result<Vec<ChecklistItem>> {
        let items = sqlx::query_as::<_, ChecklistItem>(
            "SELECT * FROM checklist_items WHERE card_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(items)
    }

    pub async fn update(&self, id: i64, text: &str, done: bool) -> Result<ChecklistItem> {
        sqlx::query_as::<_, ChecklistItem>(
            r#"
            UPDATE checklist_items
            SET text = $2,
                done = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(done)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Checklist item not found"))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Checklist item not found"));
        }

        Ok(())
    }

    pub async fn reorder(&self, card_id: i64, ordered_ids: &[i64]) -> Result<Vec<ChecklistItem>> {
        position::reorder(
            self.pool.as_ref(),
            Scope::ChecklistItems { card_id },
            ordered_ids,
        )
        .await?;
        self.list_by_card(card_id).await
    }
}
