use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub position: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskList {
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskList {
    pub title: Option<String>,
    pub position: Option<i32>,
}
