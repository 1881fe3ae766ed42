use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Board, NewBoard, ObjectType, Permission, UpdateBoard};
use crate::database::repository::{BoardRepository, RepoResult};

#[derive(FromRow)]
struct BoardRow {
    id: i64,
    project_id: i64,
    owner_id: i64,
    title: String,
    default_permissions: Option<Json<Permission>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            id: row.id,
            project_id: row.project_id,
            owner_id: row.owner_id,
            title: row.title,
            default_permissions: row.default_permissions.map(|Json(perms)| perms),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct BoardPg {
    pool: PgPool,
}

impl BoardPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoardRepository for BoardPg {
    async fn create(&self, board: &NewBoard) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO boards (project_id, owner_id, title, default_permissions)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(board.project_id)
        .bind(board.owner_id)
        .bind(&board.title)
        .bind(board.default_permissions.map(Json))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO object_perms (object_id, user_id, object_type, read, write, admin)
             VALUES ($1, $2, $3, TRUE, TRUE, TRUE)",
        )
        .bind(id)
        .bind(board.owner_id)
        .bind(ObjectType::Board)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Board> {
        sqlx::query_as::<_, BoardRow>(
            "SELECT id, project_id, owner_id, title, default_permissions, created_at, updated_at
             FROM boards
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Board::from)
        .ok_or_else(|| DatabaseError::not_found(format!("board {}", id)))
    }

    async fn get_all_for_user(&self, project_id: i64, user_id: i64) -> RepoResult<Vec<Board>> {
        let rows = sqlx::query_as::<_, BoardRow>(
            "SELECT b.id, b.project_id, b.owner_id, b.title, b.default_permissions,
                    b.created_at, b.updated_at
             FROM boards b
             JOIN object_perms op ON op.object_id = b.id AND op.object_type = $3
             WHERE b.project_id = $1 AND op.user_id = $2
             ORDER BY b.id",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(ObjectType::Board)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Board::from).collect())
    }

    async fn update(&self, id: i64, update: &UpdateBoard) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE boards
             SET title = COALESCE($2, title),
                 default_permissions = COALESCE($3, default_permissions),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.default_permissions.map(Json))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("board {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM object_perms WHERE object_id = $1 AND object_type = $2")
            .bind(id)
            .bind(ObjectType::Board)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("board {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
