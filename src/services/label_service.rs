use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, CreateLabel, UpdateLabel};
use crate::database::repository::LabelRepository;
use crate::error::ApiError;
use crate::services::ownership::Ownership;
use crate::services::permission_resolver::PermissionResolver;
use crate::services::validation::{validate_title, LABEL_NAME_MAX};

/// Board labels and their attachment to tasks
pub struct LabelService {
    labels: Arc<dyn LabelRepository>,
    ownership: Ownership,
    resolver: PermissionResolver,
}

/// Path coordinates of a task: project, board, list, task
#[derive(Debug, Clone, Copy)]
pub struct TaskPath {
    pub project_id: i64,
    pub board_id: i64,
    pub list_id: i64,
    pub task_id: i64,
}

impl LabelService {
    pub fn new(labels: Arc<dyn LabelRepository>, ownership: Ownership, resolver: PermissionResolver) -> Self {
        Self { labels, ownership, resolver }
    }

    async fn authorize_board(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        access: Access,
    ) -> Result<(), ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, access).await?;
        self.ownership.board(project_id, board_id).await?;
        Ok(())
    }

    async fn authorize_task(&self, user_id: i64, path: TaskPath, access: Access) -> Result<(), ApiError> {
        self.authorize_board(user_id, path.project_id, path.board_id, access).await?;
        self.ownership.list(path.board_id, path.list_id).await?;
        self.ownership.task(path.list_id, path.task_id).await?;
        Ok(())
    }

    pub async fn create(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        input: CreateLabel,
    ) -> Result<Payload, ApiError> {
        validate_title("Name", &input.name, LABEL_NAME_MAX)?;
        self.authorize_board(user_id, project_id, board_id, Access::Write).await?;

        let label_id = self.labels.create(board_id, &input).await?;
        tracing::info!("User {} created label {} on board {}", user_id, label_id, board_id);
        Ok(Payload::LabelId { label_id })
    }

    pub async fn get_all(&self, user_id: i64, project_id: i64, board_id: i64) -> Result<Payload, ApiError> {
        self.authorize_board(user_id, project_id, board_id, Access::Read).await?;
        let labels = self.labels.get_all(board_id).await?;
        Ok(Payload::Labels { labels })
    }

    pub async fn get_by_id(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        label_id: i64,
    ) -> Result<Payload, ApiError> {
        self.authorize_board(user_id, project_id, board_id, Access::Read).await?;
        let label = self.ownership.label(board_id, label_id).await?;
        Ok(Payload::Label { label })
    }

    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        label_id: i64,
        input: UpdateLabel,
    ) -> Result<Payload, ApiError> {
        if let Some(name) = &input.name {
            validate_title("Name", name, LABEL_NAME_MAX)?;
        }
        self.authorize_board(user_id, project_id, board_id, Access::Write).await?;
        self.ownership.label(board_id, label_id).await?;

        self.labels.update(label_id, &input).await?;
        Ok(Payload::empty())
    }

    /// Also detaches the label from every task
    pub async fn delete(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        label_id: i64,
    ) -> Result<Payload, ApiError> {
        self.authorize_board(user_id, project_id, board_id, Access::Write).await?;
        self.ownership.label(board_id, label_id).await?;

        self.labels.delete(label_id).await?;
        tracing::info!("User {} deleted label {}", user_id, label_id);
        Ok(Payload::empty())
    }

    /// The label must belong to the task's board
    pub async fn attach(&self, user_id: i64, path: TaskPath, label_id: i64) -> Result<Payload, ApiError> {
        self.authorize_task(user_id, path, Access::Write).await?;
        self.ownership.label(path.board_id, label_id).await?;

        let task_label_id = self.labels.attach(path.task_id, label_id).await?;
        Ok(Payload::TaskLabelId { task_label_id })
    }

    pub async fn get_for_task(&self, user_id: i64, path: TaskPath) -> Result<Payload, ApiError> {
        self.authorize_task(user_id, path, Access::Read).await?;
        let labels = self.labels.get_for_task(path.task_id).await?;
        Ok(Payload::Labels { labels })
    }

    pub async fn detach(&self, user_id: i64, path: TaskPath, label_id: i64) -> Result<Payload, ApiError> {
        self.authorize_task(user_id, path, Access::Write).await?;
        self.labels.detach(path.task_id, label_id).await?;
        Ok(Payload::empty())
    }
}
