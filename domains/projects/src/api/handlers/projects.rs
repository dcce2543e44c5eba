//! Project API handlers
//!
//! All routes require an authenticated caller and operate inside the
//! caller's organization. Deleting a project that still has tasks is
//! rejected by the tasks foreign key and surfaces as a conflict.

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
use crate::domain::entities::Project;

/// Request for creating a project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Request for updating a project
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Query params for listing projects
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub name: Option<String>,
}

/// Project response DTO
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            organization_id: p.organization_id,
            name: p.name,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Paged project list response
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Create a new project in the caller's organization
pub async fn create_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let project = Project::new(ctx.organization_id(), req.name, req.description)?;

    let created = state.repos.projects.create(&project).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List projects in the caller's organization
pub async fn list_projects(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<ProjectListResponse>> {
    let mut filters = Vec::new();
    if let Some(name) = query.name {
        filters.push(("name".to_string(), name));
    }

    let page = state
        .repos
        .projects
        .list(ctx.organization_id(), pagination, &filters)
        .await?;

    Ok(Json(ProjectListResponse {
        projects: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}

/// Get a single project by ID
pub async fn get_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>> {
    let project = state
        .repos
        .projects
        .find(id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    Ok(Json(project.into()))
}

/// Update a project
pub async fn update_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let updated = state
        .repos
        .projects
        .update(id, ctx.organization_id(), req.name, req.description)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete a project
pub async fn delete_project(
    AuthUser(ctx): AuthUser,
    State(state): State<ProjectsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state
        .repos
        .projects
        .delete(id, ctx.organization_id())
        .await?;
    if !deleted {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
