use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, ObjectType, Permission};
use crate::database::repository::{ObjectPermsRepository, ProjectRepository, UserRepository};
use crate::error::ApiError;
use crate::services::permission_resolver::{require, PermissionResolver};
use crate::services::validation::{validate_grant_update, validate_permissions};

/// Membership of users in a project
pub struct ProjectPermsService {
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    perms: Arc<dyn ObjectPermsRepository>,
    resolver: PermissionResolver,
}

impl ProjectPermsService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        perms: Arc<dyn ObjectPermsRepository>,
        resolver: PermissionResolver,
    ) -> Self {
        Self { projects, users, perms, resolver }
    }

    /// Grant `member_id` a permission on the project. An empty request stores
    /// the project's default permission instead.
    pub async fn create(
        &self,
        user_id: i64,
        project_id: i64,
        member_id: i64,
        requested: Permission,
    ) -> Result<Payload, ApiError> {
        validate_permissions(&requested)?;

        let permissions = if requested.is_empty() {
            let project = self.projects.get_by_id(project_id).await?;
            project.default_permissions.ok_or_else(|| {
                tracing::error!("Project {} has no default permissions", project_id);
                ApiError::internal_server_error("Default permissions are not defined for the project")
            })?
        } else {
            requested
        };

        let caller = self.resolver.resolve(user_id, project_id, ObjectType::Project).await?;
        require(&caller, Access::Admin, ObjectType::Project)?;

        self.users.get_by_id(member_id).await?;

        let id = self
            .perms
            .create(project_id, member_id, ObjectType::Project, &permissions)
            .await?;

        tracing::info!(
            "User {} granted {:?} on project {} to user {}",
            user_id,
            permissions,
            project_id,
            member_id
        );
        Ok(Payload::ProjectPermissionsId { id })
    }

    pub async fn get_all(&self, user_id: i64, project_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Read).await?;
        let permissions = self.perms.get_all(project_id, ObjectType::Project).await?;
        Ok(Payload::Permissions { permissions })
    }

    pub async fn get(&self, user_id: i64, project_id: i64, member_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Read).await?;
        let permission = self
            .perms
            .get_all(project_id, ObjectType::Project)
            .await?
            .into_iter()
            .find(|grant| grant.user_id == member_id)
            .ok_or_else(|| {
                ApiError::not_found(format!(
                    "User {} is not a member of project {}",
                    member_id, project_id
                ))
            })?;
        Ok(Payload::Permission { permission })
    }

    /// Replace a member's grant; the owner's grant is fixed
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        member_id: i64,
        permissions: Permission,
    ) -> Result<Payload, ApiError> {
        validate_grant_update(&permissions)?;
        self.resolver.require_project(user_id, project_id, Access::Admin).await?;
        self.ensure_not_owner(project_id, member_id).await?;

        self.perms
            .update(project_id, member_id, ObjectType::Project, &permissions)
            .await?;
        Ok(Payload::empty())
    }

    /// Remove a member together with their grants on the project's boards
    pub async fn delete(&self, user_id: i64, project_id: i64, member_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Admin).await?;
        self.ensure_not_owner(project_id, member_id).await?;

        self.perms.delete_project_member(project_id, member_id).await?;
        tracing::info!("User {} removed user {} from project {}", user_id, member_id, project_id);
        Ok(Payload::empty())
    }

    async fn ensure_not_owner(&self, project_id: i64, member_id: i64) -> Result<(), ApiError> {
        let project = self.projects.get_by_id(project_id).await?;
        if project.owner_id == member_id {
            tracing::warn!("Refused to change the owner of project {}", project_id);
            return Err(ApiError::forbidden("The project owner's permissions cannot be changed"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Payload;
    use crate::database::models::{ObjectType, Permission};
    use crate::testing::TestContext;

    #[tokio::test]
    async fn admin_grants_member() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project(owner).await;

        let reader = Permission::new(true, false, false);
        let payload = ctx
            .services
            .project_perms
            .create(owner, project_id, member, reader)
            .await
            .unwrap();
        assert!(matches!(payload, Payload::ProjectPermissionsId { .. }));
        assert_eq!(ctx.repos.perms.get(project_id, member, ObjectType::Project).await.unwrap(), reader);
    }

    #[tokio::test]
    async fn empty_request_uses_project_default() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let defaults = Permission::new(true, true, false);
        let project_id = ctx.project_with_defaults(owner, Some(defaults)).await;

        ctx.services
            .project_perms
            .create(owner, project_id, member, Permission::default())
            .await
            .unwrap();
        assert_eq!(ctx.repos.perms.get(project_id, member, ObjectType::Project).await.unwrap(), defaults);
    }

    #[tokio::test]
    async fn empty_request_without_default_fails() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project_with_defaults(owner, None).await;

        let err = ctx
            .services
            .project_perms
            .create(owner, project_id, member, Permission::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn unknown_member_is_not_found() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let project_id = ctx.project(owner).await;

        let err = ctx
            .services
            .project_perms
            .create(owner, project_id, 999, Permission::new(true, false, false))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn granting_twice_conflicts() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project(owner).await;
        let reader = Permission::new(true, false, false);

        ctx.services.project_perms.create(owner, project_id, member, reader).await.unwrap();
        let err = ctx
            .services
            .project_perms
            .create(owner, project_id, member, reader)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn non_admin_cannot_grant() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let writer = ctx.user("writer").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project(owner).await;
        ctx.grant_project(project_id, writer, Permission::new(true, true, false)).await;

        let err = ctx
            .services
            .project_perms
            .create(writer, project_id, member, Permission::new(true, false, false))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn owner_cannot_be_removed() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let project_id = ctx.project(owner).await;

        let err = ctx.services.project_perms.delete(owner, project_id, owner).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn removing_member_drops_board_grants() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project(owner).await;
        let board_id = ctx.board(owner, project_id).await;
        ctx.grant_project(project_id, member, Permission::new(true, false, false)).await;
        ctx.grant_board(board_id, member, Permission::new(true, false, false)).await;

        ctx.services.project_perms.delete(owner, project_id, member).await.unwrap();

        assert!(ctx.repos.perms.get(project_id, member, ObjectType::Project).await.is_err());
        assert!(ctx.repos.perms.get(board_id, member, ObjectType::Board).await.is_err());
    }

    #[tokio::test]
    async fn members_are_listed() {
        let ctx = TestContext::new();
        let owner = ctx.user("owner").await;
        let member = ctx.user("member").await;
        let project_id = ctx.project(owner).await;
        ctx.grant_project(project_id, member, Permission::new(true, false, false)).await;

        match ctx.services.project_perms.get_all(member, project_id).await.unwrap() {
            Payload::Permissions { permissions } => assert_eq!(permissions.len(), 2),
            other => panic!("unexpected payload {:?}", other),
        }
        match ctx.services.project_perms.get(member, project_id, owner).await.unwrap() {
            Payload::Permission { permission } => assert_eq!(permission.permissions, Permission::FULL),
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
