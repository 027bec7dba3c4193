use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending membership grant. Consumed (deleted) on accept or decline.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardInvite {
    pub id: i64,
    pub board_id: i64,
    pub inviter_id: i64,
    pub invitee_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InviteWithDetails {
    pub id: i64,
    pub board_id: i64,
    pub board_title: String,
    pub inviter_id: i64,
    pub inviter_email: String,
    pub inviter_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
