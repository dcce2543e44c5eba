//! Organization repository

use crate::domain::entities::Organization;
use taskhub_common::scoped::{
    fetch_page, fetch_scoped, EntityQuery, FilterField, MatchKind, Page, TenantScope,
};
use taskhub_common::{Pagination, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Query metadata: organizations are the tenancy root and list unscoped.
const ORGANIZATIONS: EntityQuery = EntityQuery {
    table: "organizations",
    columns: "id, name, created_at, updated_at",
    id_column: "id",
    order_by: "created_at",
    scope: TenantScope::Unscoped,
    filters: &[FilterField {
        name: "name",
        column: "name",
        kind: MatchKind::Contains,
    }],
};

#[derive(Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new organization
    pub async fn create(&self, org: &Organization) -> Result<Organization> {
        let created = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(org.id)
        .bind(&org.name)
        .bind(org.created_at)
        .bind(org.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List organizations with an optional name filter
    pub async fn list(
        &self,
        pagination: Pagination,
        filters: &[(String, String)],
    ) -> Result<Page<Organization>> {
        fetch_page(&self.pool, &ORGANIZATIONS, None, pagination, filters).await
    }

    /// Find organization by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Organization>> {
        fetch_scoped(&self.pool, &ORGANIZATIONS, id, None).await
    }

    /// Update an organization's name
    pub async fn update(&self, id: Uuid, name: Option<String>) -> Result<Option<Organization>> {
        let updated = sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations SET
                name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an organization.
    ///
    /// Child rows are not cleaned up here; the store's foreign keys reject
    /// the delete while users or projects still reference the organization,
    /// surfacing as a constraint violation.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
