use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub board_id: i64,
    pub name: String,
    pub color: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLabel {
    pub name: String,
    #[serde(default)]
    pub color: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabel {
    pub name: Option<String>,
    pub color: Option<i32>,
}

/// Junction row attaching a board label to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskLabel {
    pub id: i64,
    pub task_id: i64,
    pub label_id: i64,
}
