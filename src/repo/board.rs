use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Board, BoardWithRole};

#[derive(Clone)]
pub struct BoardRepository {
    pool: Arc<SqlitePool>,
}

impl BoardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, title: &str, owner_id: i64) -> Result<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, owner_id, created_at)
            VALUES ($1, $2, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(board)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(board)
    }

    /// The board, if `user_id` owns it or holds a membership on it.
    pub async fn find_accessible(&self, id: i64, user_id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.* FROM boards b
            WHERE b.id = $1
              AND (b.owner_id = $2
                   OR EXISTS (SELECT 1 FROM board_members m
                              WHERE m.board_id = b.id AND m.user_id = $2))
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(board)
    }

    pub async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Board>> {
        let board =
            sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(board)
    }

    /// Every board the user owns or is a member of, oldest first.
    pub async fn list_accessible(&self, user_id: i64) -> Result<Vec<BoardWithRole>> {
        let boards = sqlx::query_as::<_, BoardWithRole>(
            r#"
            SELECT b.id, b.title, b.owner_id, b.created_at,
                   CASE WHEN b.owner_id = $1 THEN 'OWNER' ELSE m.role END AS role
            FROM boards b
            LEFT JOIN board_members m ON m.board_id = b.id AND m.user_id = $1
            WHERE b.owner_id = $1 OR m.user_id IS NOT NULL
            ORDER BY b.created_at ASC, b.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(boards)
    }

    pub async fn update_title(&self, id: i64, title: &str) -> Result<Board> {
        sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Board not found"))
    }

    /// Lists, cards, labels, invites and memberships go with it (FK cascade).
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Board not found"));
        }

        Ok(())
    }
}
