use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{CreateLabel, Label, UpdateLabel};
use crate::database::repository::{LabelRepository, RepoResult};

pub struct LabelPg {
    pool: PgPool,
}

impl LabelPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LabelRepository for LabelPg {
    async fn create(&self, board_id: i64, label: &CreateLabel) -> RepoResult<i64> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO labels (board_id, name, color) VALUES ($1, $2, $3) RETURNING id")
                .bind(board_id)
                .bind(&label.name)
                .bind(label.color)
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Label> {
        sqlx::query_as::<_, Label>("SELECT id, board_id, name, color FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("label {}", id)))
    }

    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT id, board_id, name, color FROM labels WHERE board_id = $1 ORDER BY id",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(labels)
    }

    async fn update(&self, id: i64, update: &UpdateLabel) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE labels SET name = COALESCE($2, name), color = COALESCE($3, color) WHERE id = $1",
        )
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.color)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("label {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        // task_labels rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM labels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!("label {}", id)));
        }
        Ok(())
    }

    async fn attach(&self, task_id: i64, label_id: i64) -> RepoResult<i64> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO task_labels (task_id, label_id) VALUES ($1, $2) RETURNING id")
                .bind(task_id)
                .bind(label_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }

    async fn get_for_task(&self, task_id: i64) -> RepoResult<Vec<Label>> {
        let labels = sqlx::query_as::<_, Label>(
            "SELECT l.id, l.board_id, l.name, l.color
             FROM labels l
             JOIN task_labels tl ON tl.label_id = l.id
             WHERE tl.task_id = $1
             ORDER BY tl.id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(labels)
    }

    async fn detach(&self, task_id: i64, label_id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM task_labels WHERE task_id = $1 AND label_id = $2")
            .bind(task_id)
            .bind(label_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(format!(
                "label {} on task {}",
                label_id, task_id
            )));
        }
        Ok(())
    }
}
