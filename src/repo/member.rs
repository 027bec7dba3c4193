use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{BoardMember, BoardRole, MemberWithUser};

#[derive(Clone)]
pub struct MemberRepository {
    pool: Arc<SqlitePool>,
}

impl MemberRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Grants membership; an existing row for the pair is left untouched.
    pub async fn add(&self, board_id: i64, user_id: i64) -> Result<BoardMember> {
        let member = sqlx::query_as::<_, BoardMember>(
            r#"
            INSERT INTO board_members (board_id, user_id, role, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            ON CONFLICT(board_id, user_id) DO UPDATE SET role = role
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .bind(BoardRole::Member.to_string())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(member)
    }

    pub async fn is_member(&self, board_id: i64, user_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM board_members WHERE board_id = $1 AND user_id = $2)",
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    /// Members of the board with their user rows. A stray row for the owner
    /// is skipped.
    pub async fn list_with_users(&self, board_id: i64, owner_id: i64) -> Result<Vec<MemberWithUser>> {
        let members = sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT u.id AS user_id, u.email, u.name, m.role
            FROM board_members m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.board_id = $1 AND m.user_id != $2
            ORDER BY m.created_at ASC, u.id ASC
            "#,
        )
        .bind(board_id)
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(members)
    }

    pub async fn remove(&self, board_id: i64, user_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM board_members WHERE board_id = $1 AND user_id = $2")
            .bind(board_id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found"));
        }

        Ok(())
    }
}
