use std::sync::Arc;

use crate::database::models::{Access, ObjectType, Permission};
use crate::database::repository::ObjectPermsRepository;
use crate::error::ApiError;

/// Resolves a caller's effective permission from explicit grants.
///
/// There is no silent fallback: a caller without a grant on the object has no
/// standing on it and the lookup fails with 404. Default permissions only come
/// into play when a new member is granted an empty permission.
#[derive(Clone)]
pub struct PermissionResolver {
    perms: Arc<dyn ObjectPermsRepository>,
}

impl PermissionResolver {
    pub fn new(perms: Arc<dyn ObjectPermsRepository>) -> Self {
        Self { perms }
    }

    /// Explicit grant of `user_id` on the object. Missing grant → 404, any
    /// other repository failure → 500.
    pub async fn resolve(
        &self,
        user_id: i64,
        object_id: i64,
        object_type: ObjectType,
    ) -> Result<Permission, ApiError> {
        self.perms
            .get(object_id, user_id, object_type)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    tracing::warn!(
                        "User {} has no permissions on {} {}",
                        user_id,
                        object_type,
                        object_id
                    );
                }
                ApiError::from(err)
            })
    }

    /// Caller's project grant, which must carry `access`
    pub async fn require_project(
        &self,
        user_id: i64,
        project_id: i64,
        access: Access,
    ) -> Result<Permission, ApiError> {
        let perms = self.resolve(user_id, project_id, ObjectType::Project).await?;
        require(&perms, access, ObjectType::Project)?;
        Ok(perms)
    }

    /// Project grant first, then the board grant, which must carry `access`
    pub async fn require_board(
        &self,
        user_id: i64,
        project_id: i64,
        board_id: i64,
        access: Access,
    ) -> Result<Permission, ApiError> {
        self.resolve(user_id, project_id, ObjectType::Project).await?;
        let perms = self.resolve(user_id, board_id, ObjectType::Board).await?;
        require(&perms, access, ObjectType::Board)?;
        Ok(perms)
    }
}

/// 403 unless `perms` includes `access`
pub fn require(perms: &Permission, access: Access, object_type: ObjectType) -> Result<(), ApiError> {
    if perms.allows(access) {
        return Ok(());
    }
    tracing::warn!("Rejected: {} permission required on {}", access, object_type);
    Err(ApiError::forbidden(format!(
        "Not enough permissions: {} access to the {} is required",
        access, object_type
    )))
}
