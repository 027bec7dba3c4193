use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level of a user on a board. Owners are identified through
/// `boards.owner_id`; only members have a `board_members` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardRole {
    #[serde(rename = "OWNER")]
    Owner,
    #[serde(rename = "MEMBER")]
    Member,
}

impl std::fmt::Display for BoardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardRole::Owner => write!(f, "OWNER"),
            BoardRole::Member => write!(f, "MEMBER"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BoardWithRole {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub board: Board,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub board_id: i64,
    pub user_id: i64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Membership row joined with the user it grants access to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberWithUser {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub is_owner: bool,
}

impl From<MemberWithUser> for MemberResponse {
    fn from(m: MemberWithUser) -> Self {
        Self {
            user_id: m.user_id,
            email: m.email,
            name: m.name,
            role: m.role,
            is_owner: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoard {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteMember {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTarget {
    pub board_id: i64,
    pub board_title: String,
    pub list_id: i64,
    pub list_title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTargets {
    pub current_board_id: i64,
    pub targets: Vec<MoveTarget>,
}

#[derive(Debug, Serialize)]
pub struct BoardFull {
    pub board: Board,
    pub lists: Vec<super::ListWithCards>,
}
