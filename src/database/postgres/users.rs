use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::repository::{RepoResult, UserRepository};

const USER_COLUMNS: &str = "id, nickname, email, password, created_at";

pub struct UserPg {
    pool: PgPool,
}

impl UserPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserPg {
    async fn create(&self, user: &NewUser) -> RepoResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (nickname, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("user {}", id)))
    }

    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE nickname = $1", USER_COLUMNS))
            .bind(nickname)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("user '{}'", nickname)))
    }

    async fn get_all(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}
