use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::{CreateTask, Task, UpdateTask};
use crate::database::repository::{
    clamp_insert_position, clamp_position, RepoResult, TaskRepository,
};

const TASK_COLUMNS: &str = "id, list_id, title, description, position, created_at, updated_at";

pub struct TaskPg {
    pool: PgPool,
}

impl TaskPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock the parent list rows so position reads and shifts in them serialize.
/// Rows are locked in id order so two cross-list moves cannot deadlock.
async fn lock_lists(tx: &mut Transaction<'_, Postgres>, list_ids: &[i64]) -> RepoResult<()> {
    let mut ids = list_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    let locked: Vec<(i64,)> =
        sqlx::query_as("SELECT id FROM lists WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&ids)
            .fetch_all(&mut **tx)
            .await?;

    match ids.iter().find(|id| !locked.iter().any(|(l,)| l == *id)) {
        Some(missing) => Err(DatabaseError::not_found(format!("list {}", missing))),
        None => Ok(()),
    }
}

async fn count_in_list(tx: &mut Transaction<'_, Postgres>, list_id: i64) -> RepoResult<usize> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE list_id = $1")
        .bind(list_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(count as usize)
}

/// Close the gap left at `position` in `list_id`
async fn close_gap(
    tx: &mut Transaction<'_, Postgres>,
    list_id: i64,
    position: i32,
) -> RepoResult<()> {
    sqlx::query("UPDATE tasks SET position = position - 1 WHERE list_id = $1 AND position > $2")
        .bind(list_id)
        .bind(position)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn find_task(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    for_update: bool,
) -> RepoResult<Task> {
    let lock = if for_update { " FOR UPDATE" } else { "" };
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1{}",
        TASK_COLUMNS, lock
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| DatabaseError::not_found(format!("task {}", id)))
}

fn moved_concurrently(id: i64) -> DatabaseError {
    DatabaseError::Conflict(format!("task {} was moved by another request", id))
}

#[async_trait]
impl TaskRepository for TaskPg {
    async fn create(&self, list_id: i64, task: &CreateTask) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;
        lock_lists(&mut tx, &[list_id]).await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO tasks (list_id, title, description, position)
             SELECT $1, $2, $3, COUNT(*)::INT FROM tasks WHERE list_id = $1
             RETURNING id",
        )
        .bind(list_id)
        .bind(&task.title)
        .bind(&task.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Task> {
        sqlx::query_as::<_, Task>(&format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("task {}", id)))
    }

    async fn get_all(&self, list_id: i64) -> RepoResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE list_id = $1 ORDER BY position, id",
            TASK_COLUMNS
        ))
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn update(&self, id: i64, update: &UpdateTask) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let seen = find_task(&mut tx, id, false).await?;
        let moving_to = update.list_id.filter(|target| *target != seen.list_id);
        let mut parents = vec![seen.list_id];
        parents.extend(moving_to);
        lock_lists(&mut tx, &parents).await?;

        let task = find_task(&mut tx, id, true).await?;
        if task.list_id != seen.list_id {
            return Err(moved_concurrently(id));
        }

        sqlx::query(
            "UPDATE tasks
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .execute(&mut *tx)
        .await?;

        match moving_to {
            Some(target_list) => {
                close_gap(&mut tx, task.list_id, task.position).await?;

                let len = count_in_list(&mut tx, target_list).await?;
                let target = clamp_insert_position(update.position.unwrap_or(len as i32), len);

                sqlx::query(
                    "UPDATE tasks SET position = position + 1
                     WHERE list_id = $1 AND position >= $2",
                )
                .bind(target_list)
                .bind(target)
                .execute(&mut *tx)
                .await?;

                sqlx::query("UPDATE tasks SET list_id = $2, position = $3 WHERE id = $1")
                    .bind(id)
                    .bind(target_list)
                    .bind(target)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                if let Some(requested) = update.position {
                    let len = count_in_list(&mut tx, task.list_id).await?;
                    let target = clamp_position(requested, len);

                    if target < task.position {
                        sqlx::query(
                            "UPDATE tasks SET position = position + 1
                             WHERE list_id = $1 AND position >= $2 AND position < $3",
                        )
                        .bind(task.list_id)
                        .bind(target)
                        .bind(task.position)
                        .execute(&mut *tx)
                        .await?;
                    } else if target > task.position {
                        sqlx::query(
                            "UPDATE tasks SET position = position - 1
                             WHERE list_id = $1 AND position > $2 AND position <= $3",
                        )
                        .bind(task.list_id)
                        .bind(task.position)
                        .bind(target)
                        .execute(&mut *tx)
                        .await?;
                    }

                    sqlx::query("UPDATE tasks SET position = $2 WHERE id = $1")
                        .bind(id)
                        .bind(target)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let seen = find_task(&mut tx, id, false).await?;
        lock_lists(&mut tx, &[seen.list_id]).await?;

        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 AND list_id = $2 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(seen.list_id)
        .fetch_optional(&mut *tx)
        .await?;

        let task = match task {
            Some(task) => task,
            None => {
                // Gone entirely, or moved to a list we do not hold
                return match find_task(&mut tx, id, false).await {
                    Ok(_) => Err(moved_concurrently(id)),
                    Err(err) => Err(err),
                };
            }
        };

        close_gap(&mut tx, task.list_id, task.position).await?;

        tx.commit().await?;
        Ok(())
    }
}
