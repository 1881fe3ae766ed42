use std::sync::Arc;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Board, CreateLabel, CreateProject, CreateTask, CreateTaskList, Label, NewBoard, NewUser,
    ObjectPerms, ObjectType, Permission, Project, Task, TaskList, UpdateBoard, UpdateLabel,
    UpdateProject, UpdateTask, UpdateTaskList, User,
};

pub type RepoResult<T> = Result<T, DatabaseError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<User>;
    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<User>;
    async fn get_all(&self) -> RepoResult<Vec<User>>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Inserts the project and a full grant for its owner
    async fn create(&self, owner_id: i64, project: &CreateProject) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Project>;
    /// Projects on which the user holds an explicit grant
    async fn get_all_for_user(&self, user_id: i64) -> RepoResult<Vec<Project>>;
    async fn update(&self, id: i64, update: &UpdateProject) -> RepoResult<()>;
    /// Removes the project, everything below it and every grant on it
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Inserts the board and a full grant for its owner
    async fn create(&self, board: &NewBoard) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Board>;
    /// Boards of a project on which the user holds an explicit grant
    async fn get_all_for_user(&self, project_id: i64, user_id: i64) -> RepoResult<Vec<Board>>;
    async fn update(&self, id: i64, update: &UpdateBoard) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Appends the list after the last sibling
    async fn create(&self, board_id: i64, list: &CreateTaskList) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<TaskList>;
    /// Ordered by position
    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<TaskList>>;
    /// A new position is clamped to the sibling range and siblings shifted
    async fn update(&self, id: i64, update: &UpdateTaskList) -> RepoResult<()>;
    /// Remaining siblings are renumbered 0..n
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends the task after the last sibling
    async fn create(&self, list_id: i64, task: &CreateTask) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Task>;
    /// Ordered by position
    async fn get_all(&self, list_id: i64) -> RepoResult<Vec<Task>>;
    /// Handles reordering and moves between lists, keeping both lists dense
    async fn update(&self, id: i64, update: &UpdateTask) -> RepoResult<()>;
    /// Remaining siblings are renumbered 0..n
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait LabelRepository: Send + Sync {
    async fn create(&self, board_id: i64, label: &CreateLabel) -> RepoResult<i64>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Label>;
    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<Label>>;
    async fn update(&self, id: i64, update: &UpdateLabel) -> RepoResult<()>;
    async fn delete(&self, id: i64) -> RepoResult<()>;

    async fn attach(&self, task_id: i64, label_id: i64) -> RepoResult<i64>;
    async fn get_for_task(&self, task_id: i64) -> RepoResult<Vec<Label>>;
    async fn detach(&self, task_id: i64, label_id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait ObjectPermsRepository: Send + Sync {
    async fn create(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<i64>;

    /// NotFound when the user holds no explicit grant on the object
    async fn get(&self, object_id: i64, user_id: i64, object_type: ObjectType) -> RepoResult<Permission>;

    async fn get_all(&self, object_id: i64, object_type: ObjectType) -> RepoResult<Vec<ObjectPerms>>;

    async fn update(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<()>;

    async fn delete(&self, object_id: i64, user_id: i64, object_type: ObjectType) -> RepoResult<()>;

    /// Drops a project member together with their grants on the project's boards
    async fn delete_project_member(&self, project_id: i64, user_id: i64) -> RepoResult<()>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> RepoResult<()>;
}

/// Every repository the services are composed from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub boards: Arc<dyn BoardRepository>,
    pub lists: Arc<dyn ListRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub labels: Arc<dyn LabelRepository>,
    pub perms: Arc<dyn ObjectPermsRepository>,
    pub health: Arc<dyn HealthCheck>,
}

/// Target index for a move inside a dense 0..len sequence
pub fn clamp_position(requested: i32, len: usize) -> i32 {
    let max = len.saturating_sub(1) as i32;
    requested.clamp(0, max.max(0))
}

/// Target index when inserting into a dense 0..len sequence
pub fn clamp_insert_position(requested: i32, len: usize) -> i32 {
    requested.clamp(0, len as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_moves_into_range() {
        assert_eq!(clamp_position(-4, 3), 0);
        assert_eq!(clamp_position(1, 3), 1);
        assert_eq!(clamp_position(9, 3), 2);
        assert_eq!(clamp_position(5, 0), 0);
    }

    #[test]
    fn insert_may_append() {
        assert_eq!(clamp_insert_position(9, 3), 3);
        assert_eq!(clamp_insert_position(-1, 3), 0);
    }
}
