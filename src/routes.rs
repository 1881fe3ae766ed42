use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::database::repository::HealthCheck;
use crate::database::Repositories;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::Services;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Services,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let services = Services::new(&repos, &config.security);
        Self {
            config: Arc::new(config),
            services,
            health: repos.health,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/api/v1/users/signup", post(public::users::sign_up))
        .route("/api/v1/users/signin", post(public::users::sign_in))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(project_routes())
        .merge(board_routes())
        .merge(list_routes())
        .merge(task_routes())
        .merge(label_routes())
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn user_routes() -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/api/v1/users", get(users::me))
        .route("/api/v1/users/", get(users::me))
}

fn project_routes() -> Router<AppState> {
    use protected::{project_perms, projects};

    Router::new()
        .route("/api/v1/projects", get(projects::get_all).post(projects::create))
        .route(
            "/api/v1/projects/:pid",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Project membership
        .route("/api/v1/projects/:pid/permissions", get(project_perms::get_all))
        .route(
            "/api/v1/projects/:pid/permissions/:member_id",
            get(project_perms::get)
                .post(project_perms::create)
                .put(project_perms::update)
                .delete(project_perms::delete),
        )
}

fn board_routes() -> Router<AppState> {
    use protected::{board_perms, boards};

    Router::new()
        .route("/api/v1/projects/:pid/boards", get(boards::get_all).post(boards::create))
        .route(
            "/api/v1/projects/:pid/boards/:bid",
            get(boards::get_by_id).put(boards::update).delete(boards::delete),
        )
        // Board membership
        .route(
            "/api/v1/projects/:pid/boards/:bid/permissions",
            get(board_perms::get_all),
        )
        .route(
            "/api/v1/projects/:pid/boards/:bid/permissions/:member_id",
            get(board_perms::get)
                .post(board_perms::create)
                .put(board_perms::update)
                .delete(board_perms::delete),
        )
}

fn list_routes() -> Router<AppState> {
    use protected::lists;

    Router::new()
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists",
            get(lists::get_all).post(lists::create),
        )
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists/:lid",
            get(lists::get_by_id).put(lists::update).delete(lists::delete),
        )
}

fn task_routes() -> Router<AppState> {
    use protected::tasks;

    Router::new()
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists/:lid/tasks",
            get(tasks::get_all).post(tasks::create),
        )
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid",
            get(tasks::get_by_id).put(tasks::update).delete(tasks::delete),
        )
}

fn label_routes() -> Router<AppState> {
    use protected::labels;

    Router::new()
        .route(
            "/api/v1/projects/:pid/boards/:bid/labels",
            get(labels::get_all).post(labels::create),
        )
        .route(
            "/api/v1/projects/:pid/boards/:bid/labels/:label_id",
            get(labels::get_by_id).put(labels::update).delete(labels::delete),
        )
        // Labels attached to a task
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid/labels",
            get(labels::get_for_task),
        )
        .route(
            "/api/v1/projects/:pid/boards/:bid/lists/:lid/tasks/:tid/labels/:label_id",
            post(labels::attach).delete(labels::detach),
        )
}
