use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::models::{CreateProject, ObjectType, Permission, Project, UpdateProject};
use crate::database::repository::{ProjectRepository, RepoResult};

#[derive(FromRow)]
struct ProjectRow {
    id: i64,
    owner_id: i64,
    title: String,
    description: String,
    default_permissions: Option<Json<Permission>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            default_permissions: row.default_permissions.map(|Json(perms)| perms),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct ProjectPg {
    pool: PgPool,
}

impl ProjectPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for ProjectPg {
    async fn create(&self, owner_id: i64, project: &CreateProject) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO projects (owner_id, title, description, default_permissions)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(owner_id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.default_permissions.map(Json))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO object_perms (object_id, user_id, object_type, read, write, admin)
             VALUES ($1, $2, $3, TRUE, TRUE, TRUE)",
        )
        .bind(id)
        .bind(owner_id)
        .bind(ObjectType::Project)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Project> {
        sqlx::query_as::<_, ProjectRow>(
            "SELECT id, owner_id, title, description, default_permissions, created_at, updated_at
             FROM projects
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Project::from)
        .ok_or_else(|| DatabaseError::not_found(format!("project {}", id)))
    }

    async fn get_all_for_user(&self, user_id: i64) -> RepoResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT p.id, p.owner_id, p.title, p.description, p.default_permissions,
                    p.created_at, p.updated_at
             FROM projects p
             JOIN object_perms op ON op.object_id = p.id AND op.object_type = $2
             WHERE op.user_id = $1
             ORDER BY p.id",
        )
        .bind(user_id)
        .bind(ObjectType::Project)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update(&self, id: i64, update: &UpdateProject) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE projects
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 default_permissions = COALESCE($4, default_permissions),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.default_permissions.map(Json))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("project {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        // grants are polymorphic and carry no foreign key to their object
        sqlx::query(
            "DELETE FROM object_perms
             WHERE object_type = $2
               AND object_id IN (SELECT id FROM boards WHERE project_id = $1)",
        )
        .bind(id)
        .bind(ObjectType::Board)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM object_perms WHERE object_id = $1 AND object_type = $2")
            .bind(id)
            .bind(ObjectType::Project)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("project {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
