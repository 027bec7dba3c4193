use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateList {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateList {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderLists {
    pub ordered_list_ids: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct ListWithCards {
    #[serde(flatten)]
    pub list: List,
    pub cards: Vec<super::CardWithLabels>,
}
