use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, Board, ObjectType, Permission};
use crate::database::repository::{BoardRepository, ObjectPermsRepository};
use crate::error::ApiError;
use crate::services::ownership::Ownership;
use crate::services::permission_resolver::{require, PermissionResolver};
use crate::services::validation::{validate_grant_update, validate_permissions};

/// Membership of project members in a board
pub struct BoardPermsService {
    boards: Arc<dyn BoardRepository>,
    perms: Arc<dyn ObjectPermsRepository>,
    ownership: Ownership,
    resolver: PermissionResolver,
}

impl BoardPermsService {
    pub fn new(
        boards: Arc<dyn BoardRepository>,
        perms: Arc<dyn ObjectPermsRepository>,
        ownership: Ownership,
        resolver: PermissionResolver,
    ) -> Self {
        Self { boards, perms, ownership, resolver }
    }

    /// Grant a project member a permission on the board.
    ///
    /// Steps run in a fixed order and the first failure wins:
    /// 1. malformed shape → 400
    /// 2. empty request → board default is stored instead (no default → 500)
    /// 3. caller's project grant (missing → 404)
    /// 4. caller's board grant (missing → 404)
    /// 5. caller must be board admin → 403
    /// 6. member's project grant (missing → 404)
    /// 7. persist (already granted → 409)
    pub async fn create(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        member_id: i64,
        requested: Permission,
    ) -> Result<Payload, ApiError> {
        validate_permissions(&requested)?;

        let mut loaded: Option<Board> = None;
        let permissions = if requested.is_empty() {
            let board = self.boards.get_by_id(board_id).await?;
            let defaults = board.default_permissions.ok_or_else(|| {
                tracing::error!("Board {} has no default permissions", board_id);
                ApiError::internal_server_error("Default permissions are not defined for the board")
            })?;
            loaded = Some(board);
            defaults
        } else {
            requested
        };

        self.resolver.resolve(user_id, project_id, ObjectType::Project).await?;
        let caller = self.resolver.resolve(user_id, board_id, ObjectType::Board).await?;
        require(&caller, Access::Admin, ObjectType::Board)?;

        match loaded {
            Some(board) if board.project_id == project_id => {}
            Some(_) => {
                return Err(ApiError::not_found(format!(
                    "Board {} not found in project {}",
                    board_id, project_id
                )))
            }
            None => {
                self.ownership.board(project_id, board_id).await?;
            }
        }

        self.resolver.resolve(member_id, project_id, ObjectType::Project).await?;

        let id = self
            .perms
            .create(board_id, member_id, ObjectType::Board, &permissions)
            .await?;

        tracing::info!(
            "User {} granted {:?} on board {} to user {}",
            user_id,
            permissions,
            board_id,
            member_id
        );
        Ok(Payload::BoardPermissionsId { id })
    }

    pub async fn get_all(&self, user_id: i64, project_id: i64, board_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Read).await?;
        self.ownership.board(project_id, board_id).await?;
        let permissions = self.perms.get_all(board_id, ObjectType::Board).await?;
        Ok(Payload::Permissions { permissions })
    }

    pub async fn get(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        member_id: i64,
    ) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Read).await?;
        self.ownership.board(project_id, board_id).await?;
        let permission = self
            .perms
            .get_all(board_id, ObjectType::Board)
            .await?
            .into_iter()
            .find(|grant| grant.user_id == member_id)
            .ok_or_else(|| {
                ApiError::not_found(format!("User {} is not a member of board {}", member_id, board_id))
            })?;
        Ok(Payload::Permission { permission })
    }

    /// Replace a member's grant; the board owner's grant is fixed
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        member_id: i64,
        permissions: Permission,
    ) -> Result<Payload, ApiError> {
        validate_grant_update(&permissions)?;
        self.resolver.require_board(user_id, project_id, board_id, Access::Admin).await?;
        let board = self.ownership.board(project_id, board_id).await?;
        ensure_not_owner(&board, member_id)?;

        self.perms
            .update(board_id, member_id, ObjectType::Board, &permissions)
            .await?;
        Ok(Payload::empty())
    }

    pub async fn delete(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        member_id: i64,
    ) -> Result<Payload, ApiError> {
        self.resolver.require_board(user_id, project_id, board_id, Access::Admin).await?;
        let board = self.ownership.board(project_id, board_id).await?;
        ensure_not_owner(&board, member_id)?;

        self.perms.delete(board_id, member_id, ObjectType::Board).await?;
        tracing::info!("User {} removed user {} from board {}", user_id, member_id, board_id);
        Ok(Payload::empty())
    }
}

fn ensure_not_owner(board: &Board, member_id: i64) -> Result<(), ApiError> {
    if board.owner_id == member_id {
        tracing::warn!("Refused to change the owner of board {}", board.id);
        return Err(ApiError::forbidden("The board owner's permissions cannot be changed"));
    }
    Ok(())
}
