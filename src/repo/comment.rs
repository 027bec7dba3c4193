use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Comment, CommentWithAuthor};

#[derive(Clone)]
pub struct CommentRepository {
    pool: Arc<SqlitePool>,
}

impl CommentRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, card_id: i64, author_id: i64, content: &str) -> Result<CommentWithAuthor> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (card_id, author_id, content, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            RETURNING *
            "#,
        )
        .bind(card_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(self.pool.as_ref())
        .await?;

        self.get_with_author(comment.id).await
    }

    pub async fn find_on_card(&self, id: i64, card_id: i64) -> Result<Option<Comment>> {
        let comment =
            sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1 AND card_id = $2")
                .bind(id)
                .bind(card_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(comment)
    }

    async fn get_with_author(&self, id: i64) -> Result<CommentWithAuthor> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.card_id, c.author_id, c.content, c.created_at,
                   u.email AS author_email, u.name AS author_name
            FROM comments c
            INNER JOIN users u ON c.author_id = u.id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound("Comment not found"))
    }

    /// Oldest first, with author names joined in.
    pub async fn list_by_card(&self, card_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.card_id, c.author_id, c.content, c.created_at,
                   u.email AS author_email, u.name AS author_name
            FROM comments c
            INNER JOIN users u ON c.author_id = u.id
            WHERE c.card_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(comments)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comment not found"));
        }

        Ok(())
    }
}
