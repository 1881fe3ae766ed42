use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, CreateTaskList, UpdateTaskList};
use crate::database::repository::ListRepository;
use crate::error::ApiError;
use crate::services::ownership::Ownership;
use crate::services::permission_resolver::PermissionResolver;
use crate::services::validation::{validate_title, LIST_TITLE_MAX};

pub struct ListService {
    lists: Arc<dyn ListRepository>,
    ownership: Ownership,
    resolver: PermissionResolver,
}

impl ListService {
    pub fn new(lists: Arc<dyn ListRepository>, ownership: Ownership, resolver: PermissionResolver) -> Self {
        Self { lists, ownership, resolver }
    }

    /// Appends the list after the board's last list
    pub async fn create(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        input: CreateTaskList,
    ) -> Result<Payload, ApiError> {
        validate_title("Title", &input.title, LIST_TITLE_MAX)?;
        self.resolver.require_board(user_id, project_id, board_id, Access::Write).await?;
        self.ownership.board(project_id, board_id).await?;

        let list_id = self.lists.create(board_id, &input).await?;
        tracing::info!("User {} created list {} on board {}", user_id, list_id, board_id);
        Ok(Payload::ListId { list_id })
    }

    pub async fn get_all(&self, user_id: i64, project_id: i64, board_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Read).await?;
        self.ownership.board(project_id, board_id).await?;

        let lists = self.lists.get_all(board_id).await?;
        Ok(Payload::Lists { lists })
    }

    pub async fn get_by_id(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
    ) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Read).await?;
        self.ownership.board(project_id, board_id).await?;

        let list = self.ownership.list(board_id, list_id).await?;
        Ok(Payload::List { list })
    }

    /// Rename and/or move; an out-of-range position is clamped
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
        input: UpdateTaskList,
    ) -> Result<Payload, ApiError> {
        if let Some(title) = &input.title {
            validate_title("Title", title, LIST_TITLE_MAX)?;
        }
        self.resolver.require_board(user_id, project_id, board_id, Access::Write).await?;
        self.ownership.board(project_id, board_id).await?;
        self.ownership.list(board_id, list_id).await?;

        self.lists.update(list_id, &input).await?;
        Ok(Payload::empty())
    }

    pub async fn delete(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        list_id: i64,
    ) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Write).await?;
        self.ownership.board(project_id, board_id).await?;
        self.ownership.list(board_id, list_id).await?;

        self.lists.delete(list_id).await?;
        tracing::info!("User {} deleted list {}", user_id, list_id);
        Ok(Payload::empty())
    }
}
