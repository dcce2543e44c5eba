//! Task API handlers
//!
//! Tasks have no organization column; every operation reaches the tenant
//! through the parent project. Creating a task first resolves the parent
//! project inside the caller's organization, so a project id from another
//! tenant is simply not found.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_auth::AuthUser;
use taskhub_common::{Error, Pagination, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ProjectsState;
use crate::domain::entities::{Task, TaskStatus};
use crate::repository::TaskWithContext;

/// Request for creating a task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    pub project_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
}

/// Request for updating a task.
///
/// `assignee_id` uses double-Option semantics: absent leaves the assignee
/// untouched, explicit `null` clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_id: Option<Option<Uuid>>,
}

/// Maps an absent field to `None` and a present field (including `null`) to
/// `Some(..)`, which plain `Option` flattens away.
fn double_option<'de, D>(deserializer: D) -> std::result::Result<Option<Option<Uuid>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Query params for listing tasks
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
}

/// Parent project summary embedded in task responses
#[derive(Debug, Serialize)]
pub struct TaskProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub organization_id: Uuid,
}

/// Assignee summary embedded in task responses
#[derive(Debug, Serialize)]
pub struct TaskAssigneeSummary {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

/// Task response DTO with expanded project and assignee
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub project: TaskProjectSummary,
    pub assignee: Option<TaskAssigneeSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskWithContext> for TaskResponse {
    fn from(t: TaskWithContext) -> Self {
        let assignee = match (t.assignee_id, t.assignee_email) {
            (Some(id), Some(email)) => Some(TaskAssigneeSummary {
                id,
                email,
                name: t.assignee_name,
            }),
            _ => None,
        };
        Self {
            id: t.id,
            project_id: t.project_id,
            title: t.title,
            description: t.description,
            status: t.status,
            project: TaskProjectSummary {
                id: t.project_id,
                name: t.project_name,
                organization_id: t.project_organization_id,
            },
            assignee,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Paged task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Create a new task under a project in the caller's organization
pub async fn create_task(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    // Resolve the parent project in the caller's scope before touching tasks;
    // a foreign project id must look absent, not forbidden.
    state
        .repos
        .projects
        .find(req.project_id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    let task = Task::new(req.project_id, req.title, req.description, req.assignee_id)?;
    let created = state.repos.tasks.create(&task).await?;

    // Re-read through the scoped join so the response carries the same
    // expanded shape as reads and lists.
    let with_context = state
        .repos
        .tasks
        .find(created.id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::Internal("Created task not visible".to_string()))?;

    Ok((StatusCode::CREATED, Json(with_context.into())))
}

/// List tasks across the caller's organization
pub async fn list_tasks(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskListResponse>> {
    let mut filters = Vec::new();
    if let Some(status) = query.status {
        filters.push(("status".to_string(), status));
    }

    let page = state
        .repos
        .tasks
        .list(ctx.organization_id(), pagination, &filters)
        .await?;

    Ok(Json(TaskListResponse {
        tasks: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}

/// Get a single task by ID
pub async fn get_task(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>> {
    let task = state
        .repos
        .tasks
        .find(id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;

    Ok(Json(task.into()))
}

/// Update a task
pub async fn update_task(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    let (assignee_id, clear_assignee) = match req.assignee_id {
        None => (None, false),
        Some(None) => (None, true),
        Some(Some(assignee)) => (Some(assignee), false),
    };

    let updated = state
        .repos
        .tasks
        .update(
            id,
            ctx.organization_id(),
            req.title,
            req.description,
            req.status,
            assignee_id,
            clear_assignee,
        )
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;

    let with_context = state
        .repos
        .tasks
        .find(updated.id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::Internal("Updated task not visible".to_string()))?;

    Ok(Json(with_context.into()))
}

/// Delete a task
pub async fn delete_task(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.tasks.delete(id, ctx.organization_id()).await?;
    if !deleted {
        return Err(Error::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
