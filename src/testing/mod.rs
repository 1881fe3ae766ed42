use std::sync::Arc;

use crate::api::Payload;
use crate::config::AppConfig;
use crate::database::models::{
    CreateBoard, CreateProject, CreateTask, CreateTaskList, NewBoard, ObjectType, Permission,
    SignUpInput,
};
use crate::database::{MemoryStore, Repositories};
use crate::services::Services;

/// Services wired to a fresh in-memory store, plus shortcuts for seeding it
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub repos: Repositories,
    pub services: Services,
}

impl TestContext {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let repos = store.repositories();
        let services = Services::new(&repos, &AppConfig::development().security);
        Self { store, repos, services }
    }

    /// Registered user id
    pub async fn user(&self, nickname: &str) -> i64 {
        let input = SignUpInput {
            nickname: nickname.to_string(),
            email: format!("{}@example.com", nickname),
            password: "secret".to_string(),
        };
        match self.services.users.sign_up(input).await.expect("sign up") {
            Payload::UserId { uid } => uid,
            other => panic!("unexpected payload {:?}", other),
        }
    }

    pub async fn project(&self, owner: i64) -> i64 {
        self.project_with_defaults(owner, None).await
    }

    pub async fn project_with_defaults(&self, owner: i64, defaults: Option<Permission>) -> i64 {
        let input = CreateProject {
            title: "Project".to_string(),
            description: String::new(),
            default_permissions: defaults,
        };
        match self.services.projects.create(owner, input).await.expect("create project") {
            Payload::ProjectId { project_id } => project_id,
            other => panic!("unexpected payload {:?}", other),
        }
    }

    /// Board created through the service, inheriting project defaults
    pub async fn board(&self, owner: i64, project_id: i64) -> i64 {
        let input = CreateBoard { title: "Board".to_string(), default_permissions: None };
        match self.services.boards.create(owner, project_id, input).await.expect("create board") {
            Payload::BoardId { board_id } => board_id,
            other => panic!("unexpected payload {:?}", other),
        }
    }

    /// Board inserted straight into the store with exactly these defaults
    pub async fn board_with_defaults(&self, owner: i64, project_id: i64, defaults: Option<Permission>) -> i64 {
        let board = NewBoard {
            project_id,
            owner_id: owner,
            title: "Board".to_string(),
            default_permissions: defaults,
        };
        self.repos.boards.create(&board).await.expect("insert board")
    }

    pub async fn grant_project(&self, project_id: i64, user_id: i64, perms: Permission) {
        self.repos
            .perms
            .create(project_id, user_id, ObjectType::Project, &perms)
            .await
            .expect("grant project");
    }

    pub async fn grant_board(&self, board_id: i64, user_id: i64, perms: Permission) {
        self.repos
            .perms
            .create(board_id, user_id, ObjectType::Board, &perms)
            .await
            .expect("grant board");
    }

    pub async fn list(&self, owner: i64, project_id: i64, board_id: i64, title: &str) -> i64 {
        let input = CreateTaskList { title: title.to_string() };
        match self.services.lists.create(owner, project_id, board_id, input).await.expect("create list") {
            Payload::ListId { list_id } => list_id,
            other => panic!("unexpected payload {:?}", other),
        }
    }

    pub async fn task(&self, owner: i64, project_id: i64, board_id: i64, list_id: i64, title: &str) -> i64 {
        let input = CreateTask { title: title.to_string(), description: String::new() };
        match self
            .services
            .tasks
            .create(owner, project_id, board_id, list_id, input)
            .await
            .expect("create task")
        {
            Payload::TaskId { task_id } => task_id,
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
