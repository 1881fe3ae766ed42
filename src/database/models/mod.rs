pub mod board;
pub mod label;
pub mod list;
pub mod permission;
pub mod project;
pub mod task;
pub mod user;

pub use board::{Board, CreateBoard, NewBoard, UpdateBoard};
pub use label::{CreateLabel, Label, TaskLabel, UpdateLabel};
pub use list::{CreateTaskList, TaskList, UpdateTaskList};
pub use permission::{Access, ObjectPerms, ObjectType, Permission, PermissionShapeError};
pub use project::{CreateProject, Project, UpdateProject};
pub use task::{CreateTask, Task, UpdateTask};
pub use user::{NewUser, SignInInput, SignUpInput, User};
