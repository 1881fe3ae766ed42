mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::TestApp;

fn titles_and_positions(body: &Value, key: &str) -> Vec<(String, i64)> {
    body["data"][key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    (
                        item["title"].as_str().unwrap_or_default().to_string(),
                        item["position"].as_i64().unwrap_or(-1),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn board_workflow_end_to_end() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.login("alice").await?;

    let pid = app
        .create("/api/v1/projects", &token, json!({ "title": "Launch" }), "projectId")
        .await?;
    let board = format!("/api/v1/projects/{}/boards", pid);
    let bid = app.create(&board, &token, json!({ "title": "Week 1" }), "boardId").await?;
    let lists = format!("{}/{}/lists", board, bid);
    let lid = app.create(&lists, &token, json!({ "title": "todo" }), "listId").await?;

    let tasks = format!("{}/{}/tasks", lists, lid);
    let first = app.create(&tasks, &token, json!({ "title": "task 1" }), "taskId").await?;
    let second = app
        .create(&tasks, &token, json!({ "title": "task 2", "description": "later" }), "taskId")
        .await?;

    let (_, body) = app.get(&tasks, &token).await?;
    assert_eq!(
        titles_and_positions(&body, "tasks"),
        vec![("task 1".to_string(), 0), ("task 2".to_string(), 1)]
    );

    // Move the second task to the top
    let (status, _) = app
        .put(&format!("{}/{}", tasks, second), &token, json!({ "position": 0 }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&tasks, &token).await?;
    assert_eq!(
        titles_and_positions(&body, "tasks"),
        vec![("task 2".to_string(), 0), ("task 1".to_string(), 1)]
    );

    // Removing the top task closes the gap
    let (status, _) = app.delete(&format!("{}/{}", tasks, second), &token).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get(&tasks, &token).await?;
    assert_eq!(titles_and_positions(&body, "tasks"), vec![("task 1".to_string(), 0)]);

    let (status, body) = app.get(&format!("{}/{}", tasks, first), &token).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task"]["listId"], lid);
    Ok(())
}

#[tokio::test]
async fn lists_reorder_within_board() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.login("alice").await?;

    let pid = app
        .create("/api/v1/projects", &token, json!({ "title": "P" }), "projectId")
        .await?;
    let bid = app
        .create(&format!("/api/v1/projects/{}/boards", pid), &token, json!({ "title": "B" }), "boardId")
        .await?;
    let lists = format!("/api/v1/projects/{}/boards/{}/lists", pid, bid);

    app.create(&lists, &token, json!({ "title": "todo" }), "listId").await?;
    app.create(&lists, &token, json!({ "title": "doing" }), "listId").await?;
    let done = app.create(&lists, &token, json!({ "title": "done" }), "listId").await?;

    let (status, _) = app
        .put(&format!("{}/{}", lists, done), &token, json!({ "position": 0 }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&lists, &token).await?;
    assert_eq!(
        titles_and_positions(&body, "lists"),
        vec![
            ("done".to_string(), 0),
            ("todo".to_string(), 1),
            ("doing".to_string(), 2)
        ]
    );

    let (status, _) = app
        .post(&lists, &token, json!({ "title": "x".repeat(33) }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn task_moves_between_lists() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.login("alice").await?;

    let pid = app
        .create("/api/v1/projects", &token, json!({ "title": "P" }), "projectId")
        .await?;
    let bid = app
        .create(&format!("/api/v1/projects/{}/boards", pid), &token, json!({ "title": "B" }), "boardId")
        .await?;
    let lists = format!("/api/v1/projects/{}/boards/{}/lists", pid, bid);
    let todo = app.create(&lists, &token, json!({ "title": "todo" }), "listId").await?;
    let done = app.create(&lists, &token, json!({ "title": "done" }), "listId").await?;

    let todo_tasks = format!("{}/{}/tasks", lists, todo);
    let tid = app.create(&todo_tasks, &token, json!({ "title": "ship" }), "taskId").await?;

    let (status, _) = app
        .put(&format!("{}/{}", todo_tasks, tid), &token, json!({ "listId": done }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&todo_tasks, &token).await?;
    assert_eq!(body["data"]["tasks"], json!([]));
    let (_, body) = app.get(&format!("{}/{}/tasks", lists, done), &token).await?;
    assert_eq!(titles_and_positions(&body, "tasks"), vec![("ship".to_string(), 0)]);

    // The task is no longer reachable through its old list
    let (status, _) = app.get(&format!("{}/{}", todo_tasks, tid), &token).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn labels_attach_to_tasks() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.login("alice").await?;

    let pid = app
        .create("/api/v1/projects", &token, json!({ "title": "P" }), "projectId")
        .await?;
    let board = format!(
        "/api/v1/projects/{}/boards/{}",
        pid,
        app.create(&format!("/api/v1/projects/{}/boards", pid), &token, json!({ "title": "B" }), "boardId")
            .await?
    );
    let lid = app
        .create(&format!("{}/lists", board), &token, json!({ "title": "todo" }), "listId")
        .await?;
    let task = format!(
        "{}/lists/{}/tasks/{}",
        board,
        lid,
        app.create(&format!("{}/lists/{}/tasks", board, lid), &token, json!({ "title": "t" }), "taskId")
            .await?
    );

    let bug = app
        .create(&format!("{}/labels", board), &token, json!({ "name": "bug", "color": 16711680 }), "labelId")
        .await?;

    let (status, body) = app.post(&format!("{}/labels/{}", task, bug), &token, json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["taskLabelId"].is_i64());

    let (_, body) = app.get(&format!("{}/labels", task), &token).await?;
    assert_eq!(body["data"]["labels"][0]["name"], "bug");

    let (status, _) = app.post(&format!("{}/labels/{}", task, bug), &token, json!({})).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.delete(&format!("{}/labels/{}", task, bug), &token).await?;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get(&format!("{}/labels", task), &token).await?;
    assert_eq!(body["data"]["labels"], json!([]));
    Ok(())
}

#[tokio::test]
async fn bad_path_ids_are_bad_requests() -> Result<()> {
    let app = TestApp::new();
    let (_, token) = app.login("alice").await?;

    let (status, body) = app.get("/api/v1/projects/abc", &token).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    Ok(())
}
