use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, CreateTask, UpdateTask};
use crate::database::repository::TaskRepository;
use crate::error::ApiError;
use crate::services::ownership::Ownership;
use crate::services::permission_resolver::PermissionResolver;
use crate::services::validation::{validate_title, TASK_TITLE_MAX};

pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    ownership: Ownership,
    resolver: PermissionResolver,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, ownership: Ownership, resolver: PermissionResolver) -> Self {
        Self { tasks, ownership, resolver }
    }

    async fn authorize(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        access: Access,
    ) -> Result<(), ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, access).await?;
        self.ownership.board(project_id, board_id).await?;
        self.ownership.list(board_id, list_id).await?;
        Ok(())
    }

    /// Appends the task after the list's last task
    pub async fn create(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        input: CreateTask,
    ) -> Result<Payload, ApiError> {
        validate_title("Title", &input.title, TASK_TITLE_MAX)?;
        self.authorize(user_id, project_id, board_id, list_id, Access::Write).await?;

        let task_id = self.tasks.create(list_id, &input).await?;
        tracing::info!("User {} created task {} in list {}", user_id, task_id, list_id);
        Ok(Payload::TaskId { task_id })
    }

    pub async fn get_all(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
    ) -> Result<Payload, ApiError> {
        self.authorize(user_id, project_id, board_id, list_id, Access::Read).await?;
        let tasks = self.tasks.get_all(list_id).await?;
        Ok(Payload::Tasks { tasks })
    }

    pub async fn get_by_id(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        task_id: i64,
    ) -> Result<Payload, ApiError> {
        self.authorize(user_id, project_id, board_id, list_id, Access::Read).await?;
        let task = self.ownership.task(list_id, task_id).await?;
        Ok(Payload::Task { task })
    }

    /// Edit, reorder, or move to another list of the same board
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        task_id: i64,
        input: UpdateTask,
    ) -> Result<Payload, ApiError> {
        if let Some(title) = &input.title {
            validate_title("Title", title, TASK_TITLE_MAX)?;
        }
        self.authorize(user_id, project_id, board_id, list_id, Access::Write).await?;
        self.ownership.task(list_id, task_id).await?;

        if let Some(target) = input.list_id.filter(|target| *target != list_id) {
            self.ownership.list(board_id, target).await?;
            tracing::info!("User {} moved task {} from list {} to {}", user_id, task_id, list_id, target);
        }

        self.tasks.update(task_id, &input).await?;
        Ok(Payload::empty())
    }

    pub async fn delete(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        task_id: i64,
    ) -> Result<Payload, ApiError> {
        self.authorize(user_id, project_id, board_id, list_id, Access::Write).await?;
        self.ownership.task(list_id, task_id).await?;

        self.tasks.delete(task_id).await?;
        tracing::info!("User {} deleted task {}", user_id, task_id);
        Ok(Payload::empty())
    }
}
