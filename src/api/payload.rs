use serde::Serialize;

use crate::database::models::{Board, Label, ObjectPerms, Project, Task, TaskList, User};

/// The `data` member of every successful response.
///
/// Untagged: each variant serializes as the bare object its fields describe,
/// e.g. `Payload::ListId { list_id: 3 }` becomes `{"listId":3}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    UserId {
        uid: i64,
    },
    Token {
        token: String,
    },
    User {
        user: User,
    },

    ProjectId {
        #[serde(rename = "projectId")]
        project_id: i64,
    },
    Projects {
        projects: Vec<Project>,
    },
    Project {
        project: Project,
    },

    BoardId {
        #[serde(rename = "boardId")]
        board_id: i64,
    },
    Boards {
        boards: Vec<Board>,
    },
    Board {
        board: Board,
    },

    ProjectPermissionsId {
        #[serde(rename = "Project permissions id")]
        id: i64,
    },
    BoardPermissionsId {
        #[serde(rename = "Board permissions id")]
        id: i64,
    },
    Permissions {
        permissions: Vec<ObjectPerms>,
    },
    Permission {
        permission: ObjectPerms,
    },

    ListId {
        #[serde(rename = "listId")]
        list_id: i64,
    },
    Lists {
        lists: Vec<TaskList>,
    },
    List {
        list: TaskList,
    },

    TaskId {
        #[serde(rename = "taskId")]
        task_id: i64,
    },
    Tasks {
        tasks: Vec<Task>,
    },
    Task {
        task: Task,
    },

    LabelId {
        #[serde(rename = "labelId")]
        label_id: i64,
    },
    TaskLabelId {
        #[serde(rename = "taskLabelId")]
        task_label_id: i64,
    },
    Labels {
        labels: Vec<Label>,
    },
    Label {
        label: Label,
    },

    Service {
        name: &'static str,
        version: &'static str,
    },
    Health {
        status: &'static str,
        database: &'static str,
    },

    Empty {},
}

impl Payload {
    pub fn empty() -> Self {
        Payload::Empty {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_payloads_use_wire_names() {
        let cases = [
            (Payload::UserId { uid: 5 }, json!({"uid": 5})),
            (Payload::ProjectId { project_id: 4 }, json!({"projectId": 4})),
            (Payload::ProjectPermissionsId { id: 8 }, json!({"Project permissions id": 8})),
            (Payload::BoardPermissionsId { id: 1 }, json!({"Board permissions id": 1})),
            (Payload::TaskLabelId { task_label_id: 2 }, json!({"taskLabelId": 2})),
        ];
        for (payload, expected) in cases {
            assert_eq!(serde_json::to_value(&payload).unwrap(), expected);
        }
    }

    #[test]
    fn empty_is_an_empty_object() {
        assert_eq!(serde_json::to_value(Payload::empty()).unwrap(), json!({}));
    }

    #[test]
    fn collections_are_wrapped() {
        let list = TaskList { id: 1, board_id: 2, title: "todo".into(), position: 0 };
        let value = serde_json::to_value(Payload::Lists { lists: vec![list] }).unwrap();
        assert_eq!(value["lists"][0]["boardId"], 2);
        assert_eq!(value["lists"][0]["position"], 0);
    }
}
