//! Organization management API handlers
//!
//! Organizations are the tenancy root, so all routes here require the admin
//! role; listing is the one unscoped read in the system.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_auth::AdminUser;
use taskhub_common::{Error, Pagination, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::TenancyState;
use crate::domain::entities::Organization;

/// Request for creating an organization
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// Request for updating an organization
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

/// Query params for listing organizations
#[derive(Debug, Deserialize)]
pub struct ListOrganizationsQuery {
    pub name: Option<String>,
}

/// Organization response DTO
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(o: Organization) -> Self {
        Self {
            id: o.id,
            name: o.name,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Paged organization list response
#[derive(Debug, Serialize)]
pub struct OrganizationListResponse {
    pub organizations: Vec<OrganizationResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Create a new organization
pub async fn create_organization(
    AdminUser(_ctx): AdminUser,
    State(state): State<TenancyState>,
    ValidatedJson(req): ValidatedJson<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationResponse>)> {
    let organization = Organization::new(req.name)?;

    let created = state.repos.organizations.create(&organization).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List organizations
pub async fn list_organizations(
    AdminUser(_ctx): AdminUser,
    State(state): State<TenancyState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<ListOrganizationsQuery>,
) -> Result<Json<OrganizationListResponse>> {
    let mut filters = Vec::new();
    if let Some(name) = query.name {
        filters.push(("name".to_string(), name));
    }

    let page = state.repos.organizations.list(pagination, &filters).await?;

    Ok(Json(OrganizationListResponse {
        organizations: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}

/// Get a single organization by ID
pub async fn get_organization(
    AdminUser(_ctx): AdminUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>> {
    let organization = state
        .repos
        .organizations
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Organization not found".to_string()))?;

    Ok(Json(organization.into()))
}

/// Update an organization
pub async fn update_organization(
    AdminUser(_ctx): AdminUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationResponse>> {
    let updated = state
        .repos
        .organizations
        .update(id, req.name)
        .await?
        .ok_or_else(|| Error::NotFound("Organization not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete an organization
pub async fn delete_organization(
    AdminUser(_ctx): AdminUser,
    State(state): State<TenancyState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.organizations.delete(id).await?;
    if !deleted {
        return Err(Error::NotFound("Organization not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
