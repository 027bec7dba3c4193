use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{CardLabel, Label};

#[derive(Clone)]
pub struct LabelRepository {
    pool: Arc<SqlitePool>,
}

impl LabelRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, board_id: i64, name: &str, color: Option<&str>) -> Result<Label> {
        let label = sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (board_id, name, color, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(name)
        .bind(color)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(label)
    }

    pub async fn find_on_board(&self, id: i64, board_id: i64) -> Result<Option<Label>> {
        let label =
            sqlx::query_as::<_, Label>("SELECT * FROM labels WHERE id = $1 AND board_id = $2")
                .bind(id)
                .bind(board_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(label)
    }

    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT * FROM labels WHERE board_id = $1 ORDER BY name ASC, id ASC",
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(labels)
    }

    pub async fn update(&self, id: i64, name: &str, color: Option<&str>) -> Result<Label> {
        sqlx::query_as::<_, Label>(
            r#"
            UPDATE labels
            SET name = $2,
                color = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(color)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Label not found"))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Label not found"));
        }

        Ok(())
    }

    pub async fn list_for_card(&self, card_id: i64) -> Result<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            r#"
            SELECT lb.* FROM labels lb
            INNER JOIN card_labels cl ON lb.id = cl.label_id
            WHERE cl.card_id = $1
            ORDER BY lb.name ASC, lb.id ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(labels)
    }

    /// Every card-label link on the board, for hydrating a whole board at once.
    pub async fn list_card_links_for_board(&self, board_id: i64) -> Result<Vec<CardLabel>> {
        let links = sqlx::query_as::<_, CardLabel>(
            r#"
            SELECT cl.card_id, lb.id, lb.board_id, lb.name, lb.color, lb.created_at
            FROM card_labels cl
            INNER JOIN labels lb ON lb.id = cl.label_id
            WHERE lb.board_id = $1
            ORDER BY lb.name ASC, lb.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    /// Replaces the card's label set. Every id must name a label on
    /// `board_id`; otherwise nothing changes.
    pub async fn replace_for_card(&self, card_id: i64, board_id: i64, label_ids: &[i64]) -> Result<Vec<Label>> {
        let mut tx = self.pool.begin().await?;

        let board_labels: HashSet<i64> =
            sqlx::query_scalar::<_, i64>("SELECT id FROM labels WHERE board_id = $1")
                .bind(board_id)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .collect();

        if !label_ids.iter().all(|id| board_labels.contains(id)) {
            return Err(AppError::NotFound("Label not found"));
        }

        sqlx::query("DELETE FROM card_labels WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        for label_id in label_ids {
            sqlx::query("INSERT INTO card_labels (card_id, label_id) VALUES ($1, $2)")
                .bind(card_id)
                .bind(label_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.list_for_card(card_id).await
    }
}
