//! User management API handlers
//!
//! Reads are available to any authenticated member of the organization;
//! mutations require the admin role. Every query is bound to the caller's
//! organization — a user in another tenant is simply not found.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_auth::{AdminUser, AuthUser};
use taskhub_common::{Error, Pagination, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::TenancyState;
use crate::domain::entities::{User, UserRole};

/// Request for creating a user in the caller's organization
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

/// Request for updating a user
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

/// Query params for listing users
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// User response DTO
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            organization_id: u.organization_id,
            email: u.email,
            name: u.name,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Paged user list response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Create a new user in the caller's organization
pub async fn create_user(
    AdminUser(ctx): AdminUser,
    State(state): State<TenancyState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = User::new(
        ctx.organization_id(),
        req.email,
        req.name,
        req.role.unwrap_or_default(),
    )?;

    let created = state.repos.users.create(&user).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List users in the caller's organization
pub async fn list_users(
    AuthUser(ctx): AuthUser,
    State(state): State<TenancyState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListResponse>> {
    let mut filters = Vec::new();
    if let Some(email) = query.email {
        filters.push(("email".to_string(), email));
    }
    if let Some(name) = query.name {
        filters.push(("name".to_string(), name));
    }

    let page = state
        .repos
        .users
        .list(ctx.organization_id(), pagination, &filters)
        .await?;

    Ok(Json(UserListResponse {
        users: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}

/// Get a single user by ID
pub async fn get_user(
    AuthUser(ctx): AuthUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>> {
    let user = state
        .repos
        .users
        .find(id, ctx.organization_id())
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update a user
pub async fn update_user(
    AdminUser(ctx): AdminUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let updated = state
        .repos
        .users
        .update(id, ctx.organization_id(), req.email, req.name, req.role)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete a user
pub async fn delete_user(
    AdminUser(ctx): AdminUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.users.delete(id, ctx.organization_id()).await?;
    if !deleted {
        return Err(Error::NotFound("User not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
