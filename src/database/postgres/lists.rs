use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::{CreateTaskList, TaskList, UpdateTaskList};
use crate::database::repository::{clamp_position, ListRepository, RepoResult};

pub struct ListPg {
    pool: PgPool,
}

impl ListPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LIST_COLUMNS: &str = "id, board_id, title, position";

/// Lists of one board are positioned under the board row; hold it while shifting
async fn lock_board(tx: &mut Transaction<'_, Postgres>, board_id: i64) -> RepoResult<()> {
    sqlx::query_as::<_, (i64,)>("SELECT id FROM boards WHERE id = $1 FOR UPDATE")
        .bind(board_id)
        .fetch_optional(&mut **tx)
        .await?
        .map(|_| ())
        .ok_or_else(|| DatabaseError::not_found(format!("board {}", board_id)))
}

async fn find_list(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    for_update: bool,
) -> RepoResult<TaskList> {
    let lock = if for_update { " FOR UPDATE" } else { "" };
    sqlx::query_as::<_, TaskList>(&format!(
        "SELECT {} FROM lists WHERE id = $1{}",
        LIST_COLUMNS, lock
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))
}

#[async_trait]
impl ListRepository for ListPg {
    async fn create(&self, board_id: i64, list: &CreateTaskList) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;
        lock_board(&mut tx, board_id).await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO lists (board_id, title, position)
             SELECT $1, $2, COUNT(*)::INT FROM lists WHERE board_id = $1
             RETURNING id",
        )
        .bind(board_id)
        .bind(&list.title)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<TaskList> {
        sqlx::query_as::<_, TaskList>(&format!("SELECT {} FROM lists WHERE id = $1", LIST_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))
    }

    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<TaskList>> {
        let lists = sqlx::query_as::<_, TaskList>(&format!(
            "SELECT {} FROM lists WHERE board_id = $1 ORDER BY position, id",
            LIST_COLUMNS
        ))
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lists)
    }

    async fn update(&self, id: i64, update: &UpdateTaskList) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let seen = find_list(&mut tx, id, false).await?;
        lock_board(&mut tx, seen.board_id).await?;
        let list = find_list(&mut tx, id, true).await?;

        if let Some(title) = &update.title {
            sqlx::query("UPDATE lists SET title = $2 WHERE id = $1")
                .bind(id)
                .bind(title)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(requested) = update.position {
            let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists WHERE board_id = $1")
                .bind(list.board_id)
                .fetch_one(&mut *tx)
                .await?;
            let target = clamp_position(requested, count as usize);

            if target < list.position {
                sqlx::query(
                    "UPDATE lists SET position = position + 1
                     WHERE board_id = $1 AND position >= $2 AND position < $3",
                )
                .bind(list.board_id)
                .bind(target)
                .bind(list.position)
                .execute(&mut *tx)
                .await?;
            } else if target > list.position {
                sqlx::query(
                    "UPDATE lists SET position = position - 1
                     WHERE board_id = $1 AND position > $2 AND position <= $3",
                )
                .bind(list.board_id)
                .bind(list.position)
                .bind(target)
                .execute(&mut *tx)
                .await?;
            }

            sqlx::query("UPDATE lists SET position = $2 WHERE id = $1")
                .bind(id)
                .bind(target)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        let seen = find_list(&mut tx, id, false).await?;
        lock_board(&mut tx, seen.board_id).await?;

        let list = sqlx::query_as::<_, TaskList>(&format!(
            "DELETE FROM lists WHERE id = $1 RETURNING {}",
            LIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))?;

        sqlx::query(
            "UPDATE lists SET position = position - 1 WHERE board_id = $1 AND position > $2",
        )
        .bind(list.board_id)
        .bind(list.position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
