//! Repository tests against a live Postgres. Skipped unless DATABASE_URL is set.
//!
//! Every test creates its own users and projects with unique names, so they can
//! run in parallel against a shared database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use taskboard_api::config::AppConfig;
use taskboard_api::database::models::{
    CreateProject, CreateTask, CreateTaskList, NewBoard, NewUser, ObjectType, Permission,
    UpdateTask, UpdateTaskList,
};
use taskboard_api::database::{postgres, DatabaseError, DatabaseManager, Repositories};

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

async fn repositories() -> Result<Option<Repositories>> {
    if std::env::var("DATABASE_URL").map(|url| url.is_empty()).unwrap_or(true) {
        eprintln!("DATABASE_URL not set, skipping Postgres repository test");
        return Ok(None);
    }

    let mut config = AppConfig::from_env().database;
    config.max_connections = 16;
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(postgres::repositories(pool)))
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    format!("{}{}x{}", prefix, nanos, SEQUENCE.fetch_add(1, Ordering::SeqCst))
}

async fn user(repos: &Repositories) -> Result<i64> {
    let nickname = unique("pg");
    let uid = repos
        .users
        .create(&NewUser {
            email: format!("{}@example.com", nickname),
            nickname,
            password_hash: "unused".to_string(),
        })
        .await?;
    Ok(uid)
}

/// Owner, project and board ready for lists
async fn board(repos: &Repositories) -> Result<(i64, i64, i64)> {
    let owner = user(repos).await?;
    let project = repos
        .projects
        .create(owner, &CreateProject { title: unique("project"), ..Default::default() })
        .await?;
    let board = repos
        .boards
        .create(&NewBoard {
            project_id: project,
            owner_id: owner,
            title: "board".to_string(),
            default_permissions: None,
        })
        .await?;
    Ok((owner, project, board))
}

async fn list(repos: &Repositories, board: i64, title: &str) -> Result<i64> {
    Ok(repos.lists.create(board, &CreateTaskList { title: title.to_string() }).await?)
}

async fn task(repos: &Repositories, list: i64, title: &str) -> Result<i64> {
    let new_task = CreateTask { title: title.to_string(), ..Default::default() };
    Ok(repos.tasks.create(list, &new_task).await?)
}

async fn task_order(repos: &Repositories, list: i64) -> Result<Vec<(i64, i32)>> {
    let tasks = repos.tasks.get_all(list).await?;
    Ok(tasks.into_iter().map(|t| (t.id, t.position)).collect())
}

#[tokio::test]
async fn tasks_append_and_reorder_densely() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, _, board) = board(&repos).await?;
    let todo = list(&repos, board, "todo").await?;
    let a = task(&repos, todo, "a").await?;
    let b = task(&repos, todo, "b").await?;
    let c = task(&repos, todo, "c").await?;
    assert_eq!(task_order(&repos, todo).await?, vec![(a, 0), (b, 1), (c, 2)]);

    let to_front = UpdateTask { position: Some(0), ..Default::default() };
    repos.tasks.update(c, &to_front).await?;
    assert_eq!(task_order(&repos, todo).await?, vec![(c, 0), (a, 1), (b, 2)]);

    let past_end = UpdateTask { position: Some(99), ..Default::default() };
    repos.tasks.update(c, &past_end).await?;
    assert_eq!(task_order(&repos, todo).await?, vec![(a, 0), (b, 1), (c, 2)]);
    Ok(())
}

#[tokio::test]
async fn deletes_renumber_siblings() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, _, board) = board(&repos).await?;
    let first = list(&repos, board, "first").await?;
    let second = list(&repos, board, "second").await?;
    let third = list(&repos, board, "third").await?;
    let a = task(&repos, first, "a").await?;
    let b = task(&repos, first, "b").await?;
    let c = task(&repos, first, "c").await?;

    repos.tasks.delete(b).await?;
    assert_eq!(task_order(&repos, first).await?, vec![(a, 0), (c, 1)]);

    repos.lists.delete(second).await?;
    let lists: Vec<(i64, i32)> =
        repos.lists.get_all(board).await?.into_iter().map(|l| (l.id, l.position)).collect();
    assert_eq!(lists, vec![(first, 0), (third, 1)]);

    let to_front = UpdateTaskList { position: Some(0), ..Default::default() };
    repos.lists.update(third, &to_front).await?;
    let lists: Vec<(i64, i32)> =
        repos.lists.get_all(board).await?.into_iter().map(|l| (l.id, l.position)).collect();
    assert_eq!(lists, vec![(third, 0), (first, 1)]);
    Ok(())
}

#[tokio::test]
async fn moving_a_task_keeps_both_lists_dense() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, _, board) = board(&repos).await?;
    let todo = list(&repos, board, "todo").await?;
    let done = list(&repos, board, "done").await?;
    let a = task(&repos, todo, "a").await?;
    let b = task(&repos, todo, "b").await?;
    let x = task(&repos, done, "x").await?;

    let into_done = UpdateTask { list_id: Some(done), position: Some(0), ..Default::default() };
    repos.tasks.update(a, &into_done).await?;

    assert_eq!(task_order(&repos, todo).await?, vec![(b, 0)]);
    assert_eq!(task_order(&repos, done).await?, vec![(a, 0), (x, 1)]);
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_get_distinct_positions() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, _, board) = board(&repos).await?;
    let todo = list(&repos, board, "todo").await?;

    let mut handles = Vec::new();
    for n in 0..8 {
        let tasks = repos.tasks.clone();
        handles.push(tokio::spawn(async move {
            let new_task = CreateTask { title: format!("task {}", n), ..Default::default() };
            tasks.create(todo, &new_task).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let positions: Vec<i32> = task_order(&repos, todo).await?.into_iter().map(|(_, p)| p).collect();
    assert_eq!(positions, (0..8).collect::<Vec<i32>>());
    Ok(())
}

#[tokio::test]
async fn concurrent_moves_between_lists_stay_dense() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, _, board) = board(&repos).await?;
    let left = list(&repos, board, "left").await?;
    let right = list(&repos, board, "right").await?;
    let mut ids = Vec::new();
    for n in 0..4 {
        ids.push((task(&repos, left, &format!("l{}", n)).await?, right));
        ids.push((task(&repos, right, &format!("r{}", n)).await?, left));
    }

    let mut handles = Vec::new();
    for (id, target) in ids {
        let tasks = repos.tasks.clone();
        handles.push(tokio::spawn(async move {
            let move_to =
                UpdateTask { list_id: Some(target), position: Some(0), ..Default::default() };
            tasks.update(id, &move_to).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    for list in [left, right] {
        let positions: Vec<i32> =
            task_order(&repos, list).await?.into_iter().map(|(_, p)| p).collect();
        assert_eq!(positions, (0..4).collect::<Vec<i32>>());
    }
    Ok(())
}

#[tokio::test]
async fn duplicates_conflict() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let owner = user(&repos).await?;
    let taken = repos.users.get_by_id(owner).await?;
    let err = repos
        .users
        .create(&NewUser {
            nickname: taken.nickname.clone(),
            email: format!("other-{}", taken.email),
            password_hash: "unused".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)), "got {:?}", err);

    let (_, _, board) = board(&repos).await?;
    let member = user(&repos).await?;
    let read = Permission::new(true, false, false);
    repos.perms.create(board, member, ObjectType::Board, &read).await?;
    let err = repos.perms.create(board, member, ObjectType::Board, &read).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)), "got {:?}", err);
    Ok(())
}

#[tokio::test]
async fn removing_a_member_revokes_their_board_grants() -> Result<()> {
    let Some(repos) = repositories().await? else {
        return Ok(());
    };
    let (_, project, board) = board(&repos).await?;
    let member = user(&repos).await?;
    let read = Permission::new(true, false, false);
    repos.perms.create(project, member, ObjectType::Project, &read).await?;
    repos.perms.create(board, member, ObjectType::Board, &read).await?;

    repos.perms.delete_project_member(project, member).await?;

    let project_grant = repos.perms.get(project, member, ObjectType::Project).await;
    assert!(project_grant.unwrap_err().is_not_found());
    let board_grant = repos.perms.get(board, member, ObjectType::Board).await;
    assert!(board_grant.unwrap_err().is_not_found());
    Ok(())
}
