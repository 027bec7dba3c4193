use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::List;
use crate::repo::position::{self, Scope};

#[derive(Clone)]
pub struct ListRepository {
    pool: Arc<SqlitePool>,
}

impl ListRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Appends a list at the end of the board.
    pub async fn create(&self, board_id: i64, title: &str) -> Result<List> {
        let pos = position::next_position(self.pool.as_ref(), Scope::Lists { board_id }).await?;

        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (board_id, title, position, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(title)
        .bind(pos)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(list)
    }

    pub async fn find_on_board(&self, id: i64, board_id: i64) -> Result<Option<List>> {
        let list = sqlx::query_as::<_, List>("SELECT * FROM lists WHERE id = $1 AND board_id = $2")
            .bind(id)
            .bind(board_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(list)
    }

    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            "SELECT * FROM lists WHERE board_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(board_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists)
    }

    /// Lists of every board the user can access, grouped by board and
    /// ordered by position within each.
    pub async fn list_accessible(&self, user_id: i64) -> Result<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT l.* FROM lists l
            INNER JOIN boards b ON b.id = l.board_id
            WHERE b.owner_id = $1
               OR EXISTS (SELECT 1 FROM board_members m
                          WHERE m.board_id = b.id AND m.user_id = $1)
            ORDER BY l.board_id ASC, l.position ASC, l.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lists)
    }

    pub async fn update_title(&self, id: i64, title: &str) -> Result<List> {
        sqlx::query_as::<_, List>(
            r#"
            UPDATE lists
            SET title = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("List not found"))
    }

    /// Siblings keep their positions; the gap closes on the next reorder.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("List not found"));
        }

        Ok(())
    }

    pub async fn reorder(&self, board_id: i64, ordered_ids: &[i64]) -> Result<Vec<List>> {
        position::reorder(self.pool.as_ref(), Scope::Lists { board_id }, ordered_ids).await?;
        self.list_by_board(board_id).await
    }
}
