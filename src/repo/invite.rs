use sqlx::SqlitePool;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{BoardInvite, BoardMember, BoardRole, InviteWithDetails};

#[derive(Clone)]
pub struct InviteRepository {
    pool: Arc<SqlitePool>,
}

impl InviteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Idempotent per (board, invitee): re-inviting returns the existing row
    /// unchanged, including its original inviter.
    pub async fn upsert(&self, board_id: i64, inviter_id: i64, invitee_id: i64) -> Result<BoardInvite> {
        let invite = sqlx::query_as::<_, BoardInvite>(
            r#"
            INSERT INTO board_invites (board_id, inviter_id, invitee_id, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            ON CONFLICT(board_id, invitee_id) DO UPDATE SET created_at = created_at
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(inviter_id)
        .bind(invitee_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(invite)
    }

    /// Pending invites addressed to `invitee_id`, oldest first.
    pub async fn list_for_invitee(&self, invitee_id: i64) -> Result<Vec<InviteWithDetails>> {
        let invites = sqlx::query_as::<_, InviteWithDetails>(
            r#"
            SELECT i.id, i.board_id, b.title AS board_title,
                   i.inviter_id, u.email AS inviter_email, u.name AS inviter_name,
                   i.created_at
            FROM board_invites i
            INNER JOIN boards b ON b.id = i.board_id
            INNER JOIN users u ON u.id = i.inviter_id
            WHERE i.invitee_id = $1
            ORDER BY i.created_at ASC, i.id ASC
            "#,
        )
        .bind(invitee_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(invites)
    }

    /// Consumes the invite and grants membership in one transaction. The
    /// invite must be addressed to `invitee_id`; a consumed or foreign invite
    /// is `NotFound` and leaves everything as it was.
    pub async fn accept(&self, invite_id: i64, invitee_id: i64) -> Result<BoardMember> {
        let mut tx = self.pool.begin().await?;

        let board_id = sqlx::query_scalar::<_, i64>(
            "DELETE FROM board_invites WHERE id = $1 AND invitee_id = $2 RETURNING board_id",
        )
        .bind(invite_id)
        .bind(invitee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("Invite not found"))?;

        let member = sqlx::query_as::<_, BoardMember>(
            r#"
            INSERT INTO board_members (board_id, user_id, role, created_at)
            VALUES ($1, $2, $3, datetime('now'))
            ON CONFLICT(board_id, user_id) DO UPDATE SET role = role
            RETURNING *
            "#,
        )
        .bind(board_id)
        .bind(invitee_id)
        .bind(BoardRole::Member.to_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(member)
    }

    pub async fn decline(&self, invite_id: i64, invitee_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM board_invites WHERE id = $1 AND invitee_id = $2")
            .bind(invite_id)
            .bind(invitee_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Invite not found"));
        }

        Ok(())
    }
}
