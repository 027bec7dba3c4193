use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{nullable, ChecklistItem, CommentWithAuthor, Label};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Always midnight UTC.
    pub due_date: Option<DateTime<Utc>>,
    pub position: i64,
    pub archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCard {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCards {
    pub ordered_card_ids: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    pub target_list_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardToList {
    pub target_board_id: Option<Value>,
    pub target_list_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CardWithLabels {
    #[serde(flatten)]
    pub card: Card,
    pub labels: Vec<Label>,
}

#[derive(Debug, Serialize)]
pub struct CardDetails {
    #[serde(flatten)]
    pub card: Card,
    pub labels: Vec<Label>,
    pub checklist: Vec<ChecklistItem>,
    pub comments: Vec<CommentWithAuthor>,
}

impl Card {
    pub fn with_labels(self, labels: Vec<Label>) -> CardWithLabels {
        CardWithLabels { card: self, labels }
    }
}
