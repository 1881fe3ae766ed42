//! In-memory storage backend.
//!
//! Mirrors the Postgres repositories closely enough to run the whole API
//! without a database (`taskboard serve --in-memory`) and to drive the service
//! tests. Under `cfg(test)` every repository call is counted and individual
//! calls can be made to fail, which is how tests observe which repositories
//! an operation touched.

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Board, CreateLabel, CreateProject, CreateTask, CreateTaskList, Label, NewBoard, NewUser,
    ObjectPerms, ObjectType, Permission, Project, Task, TaskLabel, TaskList, UpdateBoard,
    UpdateLabel, UpdateProject, UpdateTask, UpdateTaskList, User,
};
use crate::database::repository::{
    clamp_insert_position, clamp_position, BoardRepository, HealthCheck, LabelRepository,
    ListRepository, ObjectPermsRepository, ProjectRepository, RepoResult, Repositories,
    TaskRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    sequences: HashMap<&'static str, i64>,
    users: Vec<User>,
    projects: Vec<Project>,
    boards: Vec<Board>,
    lists: Vec<TaskList>,
    tasks: Vec<Task>,
    labels: Vec<Label>,
    task_labels: Vec<TaskLabel>,
    perms: Vec<ObjectPerms>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }

    fn grant(
        &mut self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: Permission,
    ) -> RepoResult<i64> {
        if self.find_grant(object_id, user_id, object_type).is_some() {
            return Err(DatabaseError::Conflict(format!(
                "user {} already has permissions on {} {}",
                user_id, object_type, object_id
            )));
        }
        let id = self.next_id("object_perms");
        self.perms.push(ObjectPerms { id, object_id, user_id, object_type, permissions });
        Ok(id)
    }

    fn find_grant(&self, object_id: i64, user_id: i64, object_type: ObjectType) -> Option<usize> {
        self.perms.iter().position(|p| {
            p.object_id == object_id && p.user_id == user_id && p.object_type == object_type
        })
    }

    fn remove_task(&mut self, task_id: i64) {
        self.tasks.retain(|t| t.id != task_id);
        self.task_labels.retain(|tl| tl.task_id != task_id);
    }

    fn remove_list(&mut self, list_id: i64) {
        let task_ids: Vec<i64> = self
            .tasks
            .iter()
            .filter(|t| t.list_id == list_id)
            .map(|t| t.id)
            .collect();
        for task_id in task_ids {
            self.remove_task(task_id);
        }
        self.lists.retain(|l| l.id != list_id);
    }

    fn remove_board(&mut self, board_id: i64) {
        let list_ids: Vec<i64> = self
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .map(|l| l.id)
            .collect();
        for list_id in list_ids {
            self.remove_list(list_id);
        }
        let label_ids: HashSet<i64> = self
            .labels
            .iter()
            .filter(|l| l.board_id == board_id)
            .map(|l| l.id)
            .collect();
        self.task_labels.retain(|tl| !label_ids.contains(&tl.label_id));
        self.labels.retain(|l| l.board_id != board_id);
        self.perms.retain(|p| !(p.object_type == ObjectType::Board && p.object_id == board_id));
        self.boards.retain(|b| b.id != board_id);
    }

    fn board_ids_of(&self, project_id: i64) -> HashSet<i64> {
        self.boards.iter().filter(|b| b.project_id == project_id).map(|b| b.id).collect()
    }
}

/// Rows kept in a dense 0-based order under a parent
trait Positioned {
    fn id(&self) -> i64;
    fn parent(&self) -> i64;
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

impl Positioned for TaskList {
    fn id(&self) -> i64 {
        self.id
    }

    fn parent(&self) -> i64 {
        self.board_id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl Positioned for Task {
    fn id(&self) -> i64 {
        self.id
    }

    fn parent(&self) -> i64 {
        self.list_id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

fn sibling_count<T: Positioned>(items: &[T], parent: i64) -> usize {
    items.iter().filter(|i| i.parent() == parent).count()
}

fn shift<T: Positioned>(items: &mut [T], parent: i64, range: RangeInclusive<i32>, delta: i32) {
    for item in items.iter_mut().filter(|i| i.parent() == parent && range.contains(&i.position())) {
        let position = item.position();
        item.set_position(position + delta);
    }
}

fn reorder<T: Positioned>(items: &mut [T], id: i64, requested: i32) {
    let Some(index) = items.iter().position(|i| i.id() == id) else {
        return;
    };
    let parent = items[index].parent();
    let current = items[index].position();
    let target = clamp_position(requested, sibling_count(items, parent));

    if target < current {
        shift(items, parent, target..=current - 1, 1);
    } else if target > current {
        shift(items, parent, current + 1..=target, -1);
    }
    items[index].set_position(target);
}

fn sorted<T: Positioned + Clone>(items: &[T], parent: i64) -> Vec<T> {
    let mut out: Vec<T> = items.iter().filter(|i| i.parent() == parent).cloned().collect();
    out.sort_by_key(|i| (i.position(), i.id()));
    out
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    #[cfg(test)]
    calls: Mutex<HashMap<String, usize>>,
    #[cfg(test)]
    failures: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every repository backed by this one store
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: self.clone(),
            projects: self.clone(),
            boards: self.clone(),
            lists: self.clone(),
            tasks: self.clone(),
            labels: self.clone(),
            perms: self.clone(),
            health: self.clone(),
        }
    }

    #[cfg(not(test))]
    fn record(&self, _method: &str) -> RepoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Number of calls made to `method`, e.g. `"boards.get_by_id"`
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(method).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Number of calls made to any method of `repository`, e.g. `"boards"`
    pub fn repository_calls(&self, repository: &str) -> usize {
        let prefix = format!("{}.", repository);
        self.calls
            .lock()
            .map(|calls| {
                calls
                    .iter()
                    .filter(|(method, _)| method.starts_with(&prefix))
                    .map(|(_, count)| *count)
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn reset_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    /// Make every later call to `method` fail with a query error
    pub fn fail_on(&self, method: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(method.to_string());
        }
    }

    fn record(&self, method: &str) -> RepoResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(method.to_string()).or_insert(0) += 1;
        }
        let failing = self.failures.lock().map(|f| f.contains(method)).unwrap_or(false);
        if failing {
            return Err(DatabaseError::QueryError(format!("injected failure in {}", method)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> RepoResult<i64> {
        self.record("users.create")?;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.nickname == user.nickname || u.email == user.email) {
            return Err(DatabaseError::Conflict("nickname or email already registered".to_string()));
        }
        let id = tables.next_id("users");
        tables.users.push(User {
            id,
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<User> {
        self.record("users.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("user {}", id)))
    }

    async fn get_by_nickname(&self, nickname: &str) -> RepoResult<User> {
        self.record("users.get_by_nickname")?;
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.nickname == nickname)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("user '{}'", nickname)))
    }

    async fn get_all(&self) -> RepoResult<Vec<User>> {
        self.record("users.get_all")?;
        Ok(self.tables.read().await.users.clone())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn create(&self, owner_id: i64, project: &CreateProject) -> RepoResult<i64> {
        self.record("projects.create")?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id("projects");
        let now = Utc::now();
        tables.projects.push(Project {
            id,
            owner_id,
            title: project.title.clone(),
            description: project.description.clone(),
            default_permissions: project.default_permissions,
            created_at: now,
            updated_at: now,
        });
        tables.grant(id, owner_id, ObjectType::Project, Permission::FULL)?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Project> {
        self.record("projects.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("project {}", id)))
    }

    async fn get_all_for_user(&self, user_id: i64) -> RepoResult<Vec<Project>> {
        self.record("projects.get_all_for_user")?;
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .filter(|p| tables.find_grant(p.id, user_id, ObjectType::Project).is_some())
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, update: &UpdateProject) -> RepoResult<()> {
        self.record("projects.update")?;
        let mut tables = self.tables.write().await;
        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("project {}", id)))?;
        if let Some(title) = &update.title {
            project.title = title.clone();
        }
        if let Some(description) = &update.description {
            project.description = description.clone();
        }
        if let Some(perms) = update.default_permissions {
            project.default_permissions = Some(perms);
        }
        project.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.record("projects.delete")?;
        let mut tables = self.tables.write().await;
        if !tables.projects.iter().any(|p| p.id == id) {
            return Err(DatabaseError::not_found(format!("project {}", id)));
        }
        for board_id in tables.board_ids_of(id) {
            tables.remove_board(board_id);
        }
        tables.perms.retain(|p| !(p.object_type == ObjectType::Project && p.object_id == id));
        tables.projects.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for MemoryStore {
    async fn create(&self, board: &NewBoard) -> RepoResult<i64> {
        self.record("boards.create")?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id("boards");
        let now = Utc::now();
        tables.boards.push(Board {
            id,
            project_id: board.project_id,
            owner_id: board.owner_id,
            title: board.title.clone(),
            default_permissions: board.default_permissions,
            created_at: now,
            updated_at: now,
        });
        tables.grant(id, board.owner_id, ObjectType::Board, Permission::FULL)?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Board> {
        self.record("boards.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .boards
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("board {}", id)))
    }

    async fn get_all_for_user(&self, project_id: i64, user_id: i64) -> RepoResult<Vec<Board>> {
        self.record("boards.get_all_for_user")?;
        let tables = self.tables.read().await;
        Ok(tables
            .boards
            .iter()
            .filter(|b| b.project_id == project_id)
            .filter(|b| tables.find_grant(b.id, user_id, ObjectType::Board).is_some())
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, update: &UpdateBoard) -> RepoResult<()> {
        self.record("boards.update")?;
        let mut tables = self.tables.write().await;
        let board = tables
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("board {}", id)))?;
        if let Some(title) = &update.title {
            board.title = title.clone();
        }
        if let Some(perms) = update.default_permissions {
            board.default_permissions = Some(perms);
        }
        board.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.record("boards.delete")?;
        let mut tables = self.tables.write().await;
        if !tables.boards.iter().any(|b| b.id == id) {
            return Err(DatabaseError::not_found(format!("board {}", id)));
        }
        tables.remove_board(id);
        Ok(())
    }
}

#[async_trait]
impl ListRepository for MemoryStore {
    async fn create(&self, board_id: i64, list: &CreateTaskList) -> RepoResult<i64> {
        self.record("lists.create")?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id("lists");
        let position = sibling_count(&tables.lists, board_id) as i32;
        tables.lists.push(TaskList { id, board_id, title: list.title.clone(), position });
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<TaskList> {
        self.record("lists.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .lists
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))
    }

    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<TaskList>> {
        self.record("lists.get_all")?;
        Ok(sorted(&self.tables.read().await.lists, board_id))
    }

    async fn update(&self, id: i64, update: &UpdateTaskList) -> RepoResult<()> {
        self.record("lists.update")?;
        let mut tables = self.tables.write().await;
        let list = tables
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))?;
        if let Some(title) = &update.title {
            list.title = title.clone();
        }
        if let Some(position) = update.position {
            reorder(&mut tables.lists, id, position);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.record("lists.delete")?;
        let mut tables = self.tables.write().await;
        let list = tables
            .lists
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("list {}", id)))?;
        tables.remove_list(id);
        shift(&mut tables.lists, list.board_id, list.position + 1..=i32::MAX, -1);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn create(&self, list_id: i64, task: &CreateTask) -> RepoResult<i64> {
        self.record("tasks.create")?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id("tasks");
        let position = sibling_count(&tables.tasks, list_id) as i32;
        let now = Utc::now();
        tables.tasks.push(Task {
            id,
            list_id,
            title: task.title.clone(),
            description: task.description.clone(),
            position,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Task> {
        self.record("tasks.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("task {}", id)))
    }

    async fn get_all(&self, list_id: i64) -> RepoResult<Vec<Task>> {
        self.record("tasks.get_all")?;
        Ok(sorted(&self.tables.read().await.tasks, list_id))
    }

    async fn update(&self, id: i64, update: &UpdateTask) -> RepoResult<()> {
        self.record("tasks.update")?;
        let mut tables = self.tables.write().await;
        let index = tables
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("task {}", id)))?;

        {
            let task = &mut tables.tasks[index];
            if let Some(title) = &update.title {
                task.title = title.clone();
            }
            if let Some(description) = &update.description {
                task.description = description.clone();
            }
            task.updated_at = Utc::now();
        }

        let (old_list, old_position) = (tables.tasks[index].list_id, tables.tasks[index].position);
        match update.list_id {
            Some(target_list) if target_list != old_list => {
                shift(&mut tables.tasks, old_list, old_position + 1..=i32::MAX, -1);
                let len = sibling_count(&tables.tasks, target_list);
                let target = clamp_insert_position(update.position.unwrap_or(len as i32), len);
                shift(&mut tables.tasks, target_list, target..=i32::MAX, 1);
                let task = &mut tables.tasks[index];
                task.list_id = target_list;
                task.position = target;
            }
            _ => {
                if let Some(position) = update.position {
                    reorder(&mut tables.tasks, id, position);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.record("tasks.delete")?;
        let mut tables = self.tables.write().await;
        let task = tables
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("task {}", id)))?;
        tables.remove_task(id);
        shift(&mut tables.tasks, task.list_id, task.position + 1..=i32::MAX, -1);
        Ok(())
    }
}

#[async_trait]
impl LabelRepository for MemoryStore {
    async fn create(&self, board_id: i64, label: &CreateLabel) -> RepoResult<i64> {
        self.record("labels.create")?;
        let mut tables = self.tables.write().await;
        let id = tables.next_id("labels");
        tables.labels.push(Label { id, board_id, name: label.name.clone(), color: label.color });
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Label> {
        self.record("labels.get_by_id")?;
        let tables = self.tables.read().await;
        tables
            .labels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("label {}", id)))
    }

    async fn get_all(&self, board_id: i64) -> RepoResult<Vec<Label>> {
        self.record("labels.get_all")?;
        let tables = self.tables.read().await;
        Ok(tables.labels.iter().filter(|l| l.board_id == board_id).cloned().collect())
    }

    async fn update(&self, id: i64, update: &UpdateLabel) -> RepoResult<()> {
        self.record("labels.update")?;
        let mut tables = self.tables.write().await;
        let label = tables
            .labels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("label {}", id)))?;
        if let Some(name) = &update.name {
            label.name = name.clone();
        }
        if let Some(color) = update.color {
            label.color = color;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.record("labels.delete")?;
        let mut tables = self.tables.write().await;
        if !tables.labels.iter().any(|l| l.id == id) {
            return Err(DatabaseError::not_found(format!("label {}", id)));
        }
        tables.task_labels.retain(|tl| tl.label_id != id);
        tables.labels.retain(|l| l.id != id);
        Ok(())
    }

    async fn attach(&self, task_id: i64, label_id: i64) -> RepoResult<i64> {
        self.record("labels.attach")?;
        let mut tables = self.tables.write().await;
        if tables.task_labels.iter().any(|tl| tl.task_id == task_id && tl.label_id == label_id) {
            return Err(DatabaseError::Conflict(format!(
                "label {} already attached to task {}",
                label_id, task_id
            )));
        }
        let id = tables.next_id("task_labels");
        tables.task_labels.push(TaskLabel { id, task_id, label_id });
        Ok(id)
    }

    async fn get_for_task(&self, task_id: i64) -> RepoResult<Vec<Label>> {
        self.record("labels.get_for_task")?;
        let tables = self.tables.read().await;
        Ok(tables
            .task_labels
            .iter()
            .filter(|tl| tl.task_id == task_id)
            .filter_map(|tl| tables.labels.iter().find(|l| l.id == tl.label_id).cloned())
            .collect())
    }

    async fn detach(&self, task_id: i64, label_id: i64) -> RepoResult<()> {
        self.record("labels.detach")?;
        let mut tables = self.tables.write().await;
        let before = tables.task_labels.len();
        tables.task_labels.retain(|tl| !(tl.task_id == task_id && tl.label_id == label_id));
        if tables.task_labels.len() == before {
            return Err(DatabaseError::not_found(format!(
                "label {} on task {}",
                label_id, task_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectPermsRepository for MemoryStore {
    async fn create(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<i64> {
        self.record("perms.create")?;
        self.tables.write().await.grant(object_id, user_id, object_type, *permissions)
    }

    async fn get(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
    ) -> RepoResult<Permission> {
        self.record("perms.get")?;
        let tables = self.tables.read().await;
        tables
            .find_grant(object_id, user_id, object_type)
            .map(|index| tables.perms[index].permissions)
            .ok_or_else(|| {
                DatabaseError::not_found(format!(
                    "no permissions for user {} on {} {}",
                    user_id, object_type, object_id
                ))
            })
    }

    async fn get_all(
        &self,
        object_id: i64,
        object_type: ObjectType,
    ) -> RepoResult<Vec<ObjectPerms>> {
        self.record("perms.get_all")?;
        let tables = self.tables.read().await;
        Ok(tables
            .perms
            .iter()
            .filter(|p| p.object_id == object_id && p.object_type == object_type)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
        permissions: &Permission,
    ) -> RepoResult<()> {
        self.record("perms.update")?;
        let mut tables = self.tables.write().await;
        let index = tables.find_grant(object_id, user_id, object_type).ok_or_else(|| {
            DatabaseError::not_found(format!(
                "no permissions for user {} on {} {}",
                user_id, object_type, object_id
            ))
        })?;
        tables.perms[index].permissions = *permissions;
        Ok(())
    }

    async fn delete(
        &self,
        object_id: i64,
        user_id: i64,
        object_type: ObjectType,
    ) -> RepoResult<()> {
        self.record("perms.delete")?;
        let mut tables = self.tables.write().await;
        let index = tables.find_grant(object_id, user_id, object_type).ok_or_else(|| {
            DatabaseError::not_found(format!(
                "no permissions for user {} on {} {}",
                user_id, object_type, object_id
            ))
        })?;
        tables.perms.remove(index);
        Ok(())
    }

    async fn delete_project_member(&self, project_id: i64, user_id: i64) -> RepoResult<()> {
        self.record("perms.delete_project_member")?;
        let mut tables = self.tables.write().await;
        let index = tables.find_grant(project_id, user_id, ObjectType::Project).ok_or_else(|| {
            DatabaseError::not_found(format!(
                "no permissions for user {} on project {}",
                user_id, project_id
            ))
        })?;
        tables.perms.remove(index);
        let boards = tables.board_ids_of(project_id);
        tables.perms.retain(|p| {
            !(p.user_id == user_id
                && p.object_type == ObjectType::Board
                && boards.contains(&p.object_id))
        });
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        self.record("health.ping")
    }
}
