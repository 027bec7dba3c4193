use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: i64,
    pub card_id: i64,
    pub text: String,
    pub done: bool,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChecklistItem {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChecklistItem {
    pub text: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderChecklist {
    pub ordered_item_ids: Option<Vec<Value>>,
}
