use std::sync::Arc;

use crate::api::Payload;
use crate::database::models::{Access, CreateProject, ObjectType, UpdateProject};
use crate::database::repository::ProjectRepository;
use crate::error::ApiError;
use crate::services::permission_resolver::{require, PermissionResolver};
use crate::services::validation::{validate_permissions, validate_title, PROJECT_TITLE_MAX};

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    resolver: PermissionResolver,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>, resolver: PermissionResolver) -> Self {
        Self { projects, resolver }
    }

    /// The creator owns the project and receives a full grant on it
    pub async fn create(&self, user_id: i64, input: CreateProject) -> Result<Payload, ApiError> {
        validate_title("Title", &input.title, PROJECT_TITLE_MAX)?;
        if let Some(defaults) = &input.default_permissions {
            validate_permissions(defaults)?;
        }

        let project_id = self.projects.create(user_id, &input).await?;
        tracing::info!("User {} created project {}", user_id, project_id);
        Ok(Payload::ProjectId { project_id })
    }

    pub async fn get_all(&self, user_id: i64) -> Result<Payload, ApiError> {
        let projects = self.projects.get_all_for_user(user_id).await?;
        Ok(Payload::Projects { projects })
    }

    pub async fn get_by_id(&self, user_id: i64, project_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Read).await?;
        let project = self.projects.get_by_id(project_id).await?;
        Ok(Payload::Project { project })
    }

    /// Needs write; changing the default permissions needs admin
    pub async fn update(
        &self,
        user_id: i64,
        project_id: i64,
        input: UpdateProject,
    ) -> Result<Payload, ApiError> {
        if let Some(title) = &input.title {
            validate_title("Title", title, PROJECT_TITLE_MAX)?;
        }
        if let Some(defaults) = &input.default_permissions {
            validate_permissions(defaults)?;
        }

        let perms = self.resolver.require_project(user_id, project_id, Access::Write).await?;
        if input.default_permissions.is_some() {
            require(&perms, Access::Admin, ObjectType::Project)?;
        }

        self.projects.update(project_id, &input).await?;
        Ok(Payload::empty())
    }

    /// Removes the project with every board, list, task, label and grant below it
    pub async fn delete(&self, user_id: i64, project_id: i64) -> Result<Payload, ApiError> {
        self.resolver.require_project(user_id, project_id, Access::Admin).await?;
        self.projects.delete(project_id).await?;
        tracing::info!("User {} deleted project {}", user_id, project_id);
        Ok(Payload::empty())
    }
}
