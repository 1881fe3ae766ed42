//! Postgres-backed repositories. All queries are plain runtime `sqlx::query*`
//! calls so the crate builds without a live database.

mod boards;
mod labels;
mod lists;
mod object_perms;
mod projects;
mod tasks;
mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseManager;
use crate::database::repository::{HealthCheck, RepoResult, Repositories};

pub use boards::BoardPg;
pub use labels::LabelPg;
pub use lists::ListPg;
pub use object_perms::ObjectPermsPg;
pub use projects::ProjectPg;
pub use tasks::TaskPg;
pub use users::UserPg;

pub struct PgHealth {
    pool: PgPool,
}

#[async_trait]
impl HealthCheck for PgHealth {
    async fn ping(&self) -> RepoResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Wire every repository to the same pool
pub fn repositories(pool: PgPool) -> Repositories {
    Repositories {
        users: Arc::new(UserPg::new(pool.clone())),
        projects: Arc::new(ProjectPg::new(pool.clone())),
        boards: Arc::new(BoardPg::new(pool.clone())),
        lists: Arc::new(ListPg::new(pool.clone())),
        tasks: Arc::new(TaskPg::new(pool.clone())),
        labels: Arc::new(LabelPg::new(pool.clone())),
        perms: Arc::new(ObjectPermsPg::new(pool.clone())),
        health: Arc::new(PgHealth { pool }),
    }
}
