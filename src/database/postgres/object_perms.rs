use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{ObjectPerms, ObjectType, Permission};
use crate::database::repository::{ObjectPermsRepository, RepoResult};

pub struct ObjectPermsPg {
    pool: PgPool,
}

impl ObjectPermsPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn missing_grant(object_id: i64, user_id: i64, object_type: ObjectType) -> DatabaseError {
    DatabaseError::not_found(format!(
        "no permissions for user {} on {} {}",
        user_id, object_type, object_id
    ))
}

#[async_trait]
impl ObjectPermsRepository for ObjectPermsPg {
    async fn create(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO object_perms (object_id, user_id, object_type, read, write, admin)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(object_id)
        .bind(user_id)
        .bind(object_type)
        .bind(permissions.read)
        .bind(permissions.write)
        .bind(permissions.admin)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get(&self, object_id: i64, user_id: i64, object_type: ObjectType) -> RepoResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "SELECT read, write, admin FROM object_perms
             WHERE object_id = $1 AND user_id = $2 AND object_type = $3",
        )
        .bind(object_id)
        .bind(user_id)
        .bind(object_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| missing_grant(object_id, user_id, object_type))
    }

    async fn get_all(&self, object_id: i64, object_type: ObjectType) -> RepoResult<Vec<ObjectPerms>> {
        let grants = sqlx::query_as::<_, ObjectPerms>(
            "SELECT id, object_id, user_id, object_type, read, write, admin
             FROM object_perms
             WHERE object_id = $1 AND object_type = $2
             ORDER BY id",
        )
        .bind(object_id)
        .bind(object_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(grants)
    }

    async fn update(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE object_perms SET read = $4, write = $5, admin = $6
             WHERE object_id = $1 AND user_id = $2 AND object_type = $3",
        )
        .bind(object_id)
        .bind(user_id)
        .bind(object_type)
        .bind(permissions.read)
        .bind(permissions.write)
        .bind(permissions.admin)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(missing_grant(object_id, user_id, object_type));
        }
        Ok(())
    }

    async fn delete(&self, object_id: i64, user_id: i64, object_type: ObjectType) -> RepoResult<()> {
        let result = sqlx::query(
            "DELETE FROM object_perms WHERE object_id = $1 AND user_id = $2 AND object_type = $3",
        )
        .bind(object_id)
        .bind(user_id)
        .bind(object_type)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(missing_grant(object_id, user_id, object_type));
        }
        Ok(())
    }

    async fn delete_project_member(&self, project_id: i64, user_id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM object_perms WHERE object_id = $1 AND user_id = $2 AND object_type = $3",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(ObjectType::Project)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(missing_grant(project_id, user_id, ObjectType::Project));
        }

        sqlx::query(
            "DELETE FROM object_perms
             WHERE user_id = $2 AND object_type = $3
               AND object_id IN (SELECT id FROM boards WHERE project_id = $1)",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(ObjectType::Board)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
