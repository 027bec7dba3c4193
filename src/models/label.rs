use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nullable;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub board_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A label as attached to a specific card, used when hydrating many cards at once.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CardLabel {
    pub card_id: i64,
    #[sqlx(flatten)]
    pub label: Label,
}

#[derive(Debug, Deserialize)]
pub struct CreateLabel {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLabel {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub color: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCardLabels {
    pub label_ids: Option<Vec<Value>>,
}
