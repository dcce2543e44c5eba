//! Project repository

use crate::domain::entities::Project;
use sqlx::PgPool;
use taskhub_common::scoped::{
    fetch_page, fetch_scoped, EntityQuery, FilterField, MatchKind, Page, TenantScope,
};
use taskhub_common::{Pagination, Result};
use uuid::Uuid;

/// Query metadata: projects are directly scoped by their organization column.
const PROJECTS: EntityQuery = EntityQuery {
    table: "projects",
    columns: "id, organization_id, name, description, created_at, updated_at",
    id_column: "id",
    order_by: "created_at",
    scope: TenantScope::Column("organization_id"),
    filters: &[FilterField {
        name: "name",
        column: "name",
        kind: MatchKind::Contains,
    }],
};

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new project
    pub async fn create(&self, project: &Project) -> Result<Project> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, organization_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, organization_id, name, description, created_at, updated_at
            "#,
        )
        .bind(project.id)
        .bind(project.organization_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List projects inside an organization with an optional name filter
    pub async fn list(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
        filters: &[(String, String)],
    ) -> Result<Page<Project>> {
        fetch_page(
            &self.pool,
            &PROJECTS,
            Some(organization_id),
            pagination,
            filters,
        )
        .await
    }

    /// Find a project by ID within the caller's organization
    pub async fn find(&self, id: Uuid, organization_id: Uuid) -> Result<Option<Project>> {
        fetch_scoped(&self.pool, &PROJECTS, id, Some(organization_id)).await
    }

    /// Update a project's name and description within the caller's organization
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Project>> {
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a project within the caller's organization.
    ///
    /// Fails with a constraint error while tasks still reference it; callers
    /// surface that as a conflict rather than cascading.
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
