use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, CreateBoard, NewBoard, ObjectType, UpdateBoard};
use crate::database::repository::{BoardRepository, ProjectRepository};
use crate::error::ApiError;
use crate::services::ownership::Ownership;
use crate::services::permission_resolver::{require, PermissionResolver};
use crate::services::validation::{validate_permissions, validate_title, BOARD_TITLE_MAX};

pub struct BoardService {
    boards: Arc<dyn BoardRepository>,
    projects: Arc<dyn ProjectRepository>,
    ownership: Ownership,
    resolver: PermissionResolver,
}

impl BoardService {
    pub fn new(
        boards: Arc<dyn BoardRepository>,
        projects: Arc<dyn ProjectRepository>,
        ownership: Ownership,
        resolver: PermissionResolver,
    ) -> Self {
        Self { boards, projects, ownership, resolver }
    }

    /// Needs project write. Without explicit defaults the board inherits the
    /// project's default permissions.
    pub async fn create(&self, user_id: i64, project_id: i64, input: CreateBoard) -> Result<Payload, ApiError> {
        validate_title("Title", &input.title, BOARD_TITLE_MAX)?;
        if let Some(defaults) = &input.default_permissions {
            validate_permissions(defaults)?;
        }

        self.resolver.require_project(user_id, project_id, Access::Write).await?;

        let default_permissions = match input.default_permissions {
            Some(defaults) => Some(defaults),
            None => self.projects.get_by_id(project_id).await?.default_permissions,
        };

        let board = NewBoard {
            project_id,
            owner_id: user_id,
            title: input.title,
            default_permissions,
        };
        let board_id = self.boards.create(&board).await?;

        tracing::info!("User {} created board {} in project {}", user_id, board_id, project_id);
        Ok(Payload::BoardId { board_id })
    }

    /// Boards of the project the caller holds a grant on
    pub async fn get_all(&self, user_id: i64, project_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Read).await?;
        let boards = self.boards.get_all_for_user(project_id, user_id).await?;
        Ok(Payload::Boards { boards })
    }

    pub async fn get_by_id(&self, user_id: i64, project_id: i64, board_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Read).await?;
        let board = self.ownership.board(project_id, board_id).await?;
        Ok(Payload::Board { board })
    }

    /// Needs board write; changing the default permissions needs board admin
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        input: UpdateBoard,
    ) -> Result<Payload, ApiError> {
        if let Some(title) = &input.title {
            validate_title("Title", title, BOARD_TITLE_MAX)?;
        }
        if let Some(defaults) = &input.default_permissions {
            validate_permissions(defaults)?;
        }

        let perms = self.resolver.require_board(user_id, project_id, board_id, Access::Write).await?;
        if input.default_permissions.is_some() {
            require(&perms, Access::Admin, ObjectType::Board)?;
        }
        self.ownership.board(project_id, board_id).await?;

        self.boards.update(board_id, &input).await?;
        Ok(Payload::empty())
    }

    pub async fn delete(&self, user_id: i64, project_id: i64, board_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Admin).await?;
        self.ownership.board(project_id, board_id).await?;

        self.boards.delete(board_id).await?;
        tracing::info!("User {} deleted board {}", user_id, board_id);
        Ok(Payload::empty())
    }
}
