//! User repository

use crate::domain::entities::{User, UserRole};
use taskhub_common::scoped::{
    fetch_page, fetch_scoped, EntityQuery, FilterField, MatchKind, Page, TenantScope,
};
use taskhub_common::{Pagination, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Query metadata: users are directly scoped by their organization column.
const USERS: EntityQuery = EntityQuery {
    table: "users",
    columns: "id, organization_id, email, name, role, created_at, updated_at",
    id_column: "id",
    order_by: "created_at",
    scope: TenantScope::Column("organization_id"),
    filters: &[
        FilterField {
            name: "email",
            column: "email",
            kind: MatchKind::Contains,
        },
        FilterField {
            name: "name",
            column: "name",
            kind: MatchKind::Contains,
        },
    ],
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, user: &User) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, organization_id, email, name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, organization_id, email, name, role, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(user.organization_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List users inside an organization with optional email/name filters
    pub async fn list(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
        filters: &[(String, String)],
    ) -> Result<Page<User>> {
        fetch_page(&self.pool, &USERS, Some(organization_id), pagination, filters).await
    }

    /// Find a user by ID within the caller's organization
    pub async fn find(&self, id: Uuid, organization_id: Uuid) -> Result<Option<User>> {
        fetch_scoped(&self.pool, &USERS, id, Some(organization_id)).await
    }

    /// Find a user by email across all organizations.
    ///
    /// Deliberately unscoped: identity lookup during authentication happens
    /// before the tenant is known. Never reuse this where tenant isolation
    /// is required.
    pub async fn find_by_email_unscoped(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organization_id, email, name, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update a user's profile fields within the caller's organization
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        email: Option<String>,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> Result<Option<User>> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE($3, email),
                name = COALESCE($4, name),
                role = COALESCE($5, role),
                updated_at = NOW()
            WHERE id = $1 AND organization_id = $2
            RETURNING id, organization_id, email, name, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(email)
        .bind(name)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a user within the caller's organization
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND organization_id = $2")
            .bind(id)
            .bind(organization_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
