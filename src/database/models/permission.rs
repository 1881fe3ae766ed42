use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Read/write/admin triple granted on a project or a board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Permission {
    pub read: bool,
    pub write: bool,
    pub admin: bool,
}

/// The flag an operation needs from the caller's effective permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Admin,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
            Access::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PermissionShapeError {
    #[error("Admin permission requires write permission")]
    AdminWithoutWrite,

    #[error("Write permission requires read permission")]
    WriteWithoutRead,
}

impl Permission {
    pub const FULL: Permission = Permission { read: true, write: true, admin: true };

    pub fn new(read: bool, write: bool, admin: bool) -> Self {
        Self { read, write, admin }
    }

    /// All flags false. A grant request in this shape means "use the default".
    pub fn is_empty(&self) -> bool {
        !self.read && !self.write && !self.admin
    }

    /// admin implies write, write implies read
    pub fn validate(&self) -> Result<(), PermissionShapeError> {
        if self.admin && !self.write {
            return Err(PermissionShapeError::AdminWithoutWrite);
        }
        if self.write && !self.read {
            return Err(PermissionShapeError::WriteWithoutRead);
        }
        Ok(())
    }

    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::Read => self.read,
            Access::Write => self.write,
            Access::Admin => self.admin,
        }
    }
}

/// Discriminates project-scoped from board-scoped grants sharing one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum ObjectType {
    Project = 1,
    Board = 2,
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectType::Project => write!(f, "project"),
            ObjectType::Board => write!(f, "board"),
        }
    }
}

/// One explicit grant: (object, user, object type) -> permission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPerms {
    pub id: i64,
    pub object_id: i64,
    pub user_id: i64,
    pub object_type: ObjectType,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub permissions: Permission,
}
