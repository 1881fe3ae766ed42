use std::sync::Arc;

use crate::database::models::{Board, Label, Task, TaskList};
use crate::database::repository::{BoardRepository, LabelRepository, ListRepository, TaskRepository};
use crate::error::ApiError;

/// Parentage checks for nested paths. A child that exists but hangs under a
/// different parent is reported exactly like a missing one (404).
#[derive(Clone)]
pub struct Ownership {
    boards: Arc<dyn BoardRepository>,
    lists: Arc<dyn ListRepository>,
    tasks: Arc<dyn TaskRepository>,
    labels: Arc<dyn LabelRepository>,
}

impl Ownership {
    pub fn new(
        boards: Arc<dyn BoardRepository>,
        lists: Arc<dyn ListRepository>,
        tasks: Arc<dyn TaskRepository>,
        labels: Arc<dyn LabelRepository>,
    ) -> Self {
        Self { boards, lists, tasks, labels }
    }

    pub async fn board(&self, project_id: i64, board_id: i64) -> Result<Board, ApiError> {
        let board = self.boards.get_by_id(board_id).await?;
        ensure_parent(board.project_id, project_id, "Board", board_id, "project")?;
        Ok(board)
    }

    pub async fn list(&self, board_id: i64, list_id: i64) -> Result<TaskList, ApiError> {
        let list = self.lists.get_by_id(list_id).await?;
        ensure_parent(list.board_id, board_id, "List", list_id, "board")?;
        Ok(list)
    }

    pub async fn task(&self, list_id: i64, task_id: i64) -> Result<Task, ApiError> {
        let task = self.tasks.get_by_id(task_id).await?;
        ensure_parent(task.list_id, list_id, "Task", task_id, "list")?;
        Ok(task)
    }

    pub async fn label(&self, board_id: i64, label_id: i64) -> Result<Label, ApiError> {
        let label = self.labels.get_by_id(label_id).await?;
        ensure_parent(label.board_id, board_id, "Label", label_id, "board")?;
        Ok(label)
    }
}

fn ensure_parent(
    actual_parent: i64,
    expected_parent: i64,
    kind: &str,
    id: i64,
    parent_kind: &str,
) -> Result<(), ApiError> {
    if actual_parent != expected_parent {
        return Err(ApiError::not_found(format!(
            "{} {} not found in {} {}",
            kind, id, parent_kind, expected_parent
        )));
    }
    Ok(())
}
