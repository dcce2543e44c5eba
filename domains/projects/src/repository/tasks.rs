//! Task repository
//!
//! Tasks carry no organization column of their own; every scoped read and
//! write reaches the tenant through the parent project. Reads return a
//! joined row carrying the project and assignee context the API responds
//! with, so handlers never issue follow-up lookups.

use crate::domain::entities::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskhub_common::scoped::{
    fetch_page, fetch_scoped, EntityQuery, FilterField, MatchKind, Page, TenantScope,
};
use taskhub_common::{Pagination, Result};
use uuid::Uuid;

/// A task joined with its project and (optional) assignee.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskWithContext {
    pub id: Uuid,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub project_name: String,
    pub project_organization_id: Uuid,
    pub assignee_email: Option<String>,
    pub assignee_name: Option<String>,
}

/// Query metadata: tasks reach their organization through the parent project.
const TASKS: EntityQuery = EntityQuery {
    table: "tasks t \
            JOIN projects p ON p.id = t.project_id \
            LEFT JOIN users u ON u.id = t.assignee_id",
    columns: "t.id, t.project_id, t.assignee_id, t.title, t.description, t.status, \
              t.created_at, t.updated_at, \
              p.name AS project_name, p.organization_id AS project_organization_id, \
              u.email AS assignee_email, u.name AS assignee_name",
    id_column: "t.id",
    order_by: "t.created_at",
    scope: TenantScope::ParentOrg {
        fk_column: "t.project_id",
        parent_table: "projects",
    },
    filters: &[FilterField {
        name: "status",
        column: "t.status",
        kind: MatchKind::Exact,
    }],
};

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new task. The caller must already have verified that the
    /// parent project belongs to the tenant.
    pub async fn create(&self, task: &Task) -> Result<Task> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, project_id, assignee_id, title, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, project_id, assignee_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(task.project_id)
        .bind(task.assignee_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List tasks across the organization's projects with an optional status
    /// filter
    pub async fn list(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
        filters: &[(String, String)],
    ) -> Result<Page<TaskWithContext>> {
        fetch_page(
            &self.pool,
            &TASKS,
            Some(organization_id),
            pagination,
            filters,
        )
        .await
    }

    /// Find a task by ID within the caller's organization
    pub async fn find(&self, id: Uuid, organization_id: Uuid) -> Result<Option<TaskWithContext>> {
        fetch_scoped(&self.pool, &TASKS, id, Some(organization_id)).await
    }

    /// Update a task within the caller's organization.
    ///
    /// `clear_assignee` distinguishes "unassign" from "leave the assignee
    /// alone", which a bare Option cannot express.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        organization_id: Uuid,
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
        assignee_id: Option<Uuid>,
        clear_assignee: bool,
    ) -> Result<Option<Task>> {
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                assignee_id = CASE WHEN $7 THEN NULL ELSE COALESCE($6, assignee_id) END,
                updated_at = NOW()
            WHERE id = $1
              AND project_id IN (SELECT id FROM projects WHERE organization_id = $2)
            RETURNING id, project_id, assignee_id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(assignee_id)
        .bind(clear_assignee)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a task within the caller's organization
    pub async fn delete(&self, id: Uuid, organization_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
              AND project_id IN (SELECT id FROM projects WHERE organization_id = $2)
            "#,
        )
        .bind(id)
        .bind(organization_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
