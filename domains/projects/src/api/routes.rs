//! Route definitions for Projects domain API

use axum::{routing::get, Router};

use super::handlers::{projects, tasks};
use super::middleware::ProjectsState;

/// Create project routes
fn project_routes() -> Router<ProjectsState> {
    Router::new()
        .route(
            "/v1/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/v1/projects/{id}",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
}

/// Create task routes
fn task_routes() -> Router<ProjectsState> {
    Router::new()
        .route("/v1/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/v1/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
}

/// Create all Projects domain API routes
pub fn routes() -> Router<ProjectsState> {
    Router::new().merge(project_routes()).merge(task_routes())
}
