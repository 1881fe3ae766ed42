pub mod board_perms_service;
pub mod board_service;
pub mod label_service;
pub mod list_service;
pub mod ownership;
pub mod permission_resolver;
pub mod project_perms_service;
pub mod project_service;
pub mod task_service;
pub mod user_service;
pub mod validation;

use std::sync::Arc;

use crate::config::SecurityConfig;
use crate::database::Repositories;

pub use board_perms_service::BoardPermsService;
pub use board_service::BoardService;
pub use label_service::{LabelService, TaskPath};
pub use list_service::ListService;
pub use ownership::Ownership;
pub use permission_resolver::PermissionResolver;
pub use project_perms_service::ProjectPermsService;
pub use project_service::ProjectService;
pub use task_service::TaskService;
pub use user_service::UserService;

/// One instance of every service, composed from the repositories
#[derive(Clone)]
pub struct Services {
    pub users: Arc<UserService>,
    pub projects: Arc<ProjectService>,
    pub project_perms: Arc<ProjectPermsService>,
    pub boards: Arc<BoardService>,
    pub board_perms: Arc<BoardPermsService>,
    pub lists: Arc<ListService>,
    pub tasks: Arc<TaskService>,
    pub labels: Arc<LabelService>,
}

impl Services {
    pub fn new(repos: &Repositories, security: &SecurityConfig) -> Self {
        let resolver = PermissionResolver::new(repos.perms.clone());
        let ownership = Ownership::new(
            repos.boards.clone(),
            repos.lists.clone(),
            repos.tasks.clone(),
            repos.labels.clone(),
        );

        Self {
            users: Arc::new(UserService::new(repos.users.clone(), security.clone())),
            projects: Arc::new(ProjectService::new(repos.projects.clone(), resolver.clone())),
            project_perms: Arc::new(ProjectPermsService::new(
                repos.projects.clone(),
                repos.users.clone(),
                repos.perms.clone(),
                resolver.clone(),
            )),
            boards: Arc::new(BoardService::new(
                repos.boards.clone(),
                repos.projects.clone(),
                ownership.clone(),
                resolver.clone(),
            )),
            board_perms: Arc::new(BoardPermsService::new(
                repos.boards.clone(),
                repos.perms.clone(),
                ownership.clone(),
                resolver.clone(),
            )),
            lists: Arc::new(ListService::new(repos.lists.clone(), ownership.clone(), resolver.clone())),
            tasks: Arc::new(TaskService::new(repos.tasks.clone(), ownership.clone(), resolver.clone())),
            labels: Arc::new(LabelService::new(repos.labels.clone(), ownership, resolver)),
        }
    }
}
