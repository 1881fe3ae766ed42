// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every handler here runs behind `jwt_auth_middleware` and receives the
// caller as `Extension<AuthUser>`. Nested paths carry the ids of every parent.

pub mod board_perms;
pub mod boards;
pub mod labels;
pub mod lists;
pub mod project_perms;
pub mod projects;
pub mod tasks;
pub mod users;
