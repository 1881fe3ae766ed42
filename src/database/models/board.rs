use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::permission::Permission;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub project_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub default_permissions: Option<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    pub title: String,
    pub default_permissions: Option<Permission>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub default_permissions: Option<Permission>,
}

/// Row values for a new board after defaults were resolved
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub project_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub default_permissions: Option<Permission>,
}
