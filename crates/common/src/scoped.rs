//! Tenant-scoped query core
//!
//! Every listable resource follows the same shape: scope to the caller's
//! organization, apply a whitelisted filter, paginate, and return the page
//! together with the total count of rows matching the same predicates.
//! Rather than hand-copying that per resource, each repository declares a
//! static [`EntityQuery`] and delegates to the generic routines here.
//!
//! A row outside the caller's scope is indistinguishable from an absent row:
//! scoped reads return `None` and scoped writes match zero rows, so
//! cross-tenant probes never learn whether an id exists.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::extractors::Pagination;
use crate::{Error, Result};

/// How an entity reaches its owning organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// No organization predicate (Organization itself)
    Unscoped,
    /// Direct equality on an organization id column
    Column(&'static str),
    /// Transitive scope: the row's foreign key must reference a parent row
    /// owned by the organization (Task → Project → Organization)
    ParentOrg {
        fk_column: &'static str,
        parent_table: &'static str,
    },
}

/// Match semantics for a whitelisted filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact match on the column's text form (works uniformly for enum columns)
    Exact,
    /// Substring match
    Contains,
}

/// One entry in an entity's filter whitelist.
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    /// Filter key as it appears in the query string
    pub name: &'static str,
    /// Column expression the filter applies to (qualified when the entity
    /// query joins other tables)
    pub column: &'static str,
    pub kind: MatchKind,
}

/// Static per-entity query metadata.
///
/// `table` may include joins; `id_column` and `order_by` must then be
/// qualified to stay unambiguous.
#[derive(Debug, Clone, Copy)]
pub struct EntityQuery {
    pub table: &'static str,
    pub columns: &'static str,
    pub id_column: &'static str,
    pub order_by: &'static str,
    pub scope: TenantScope,
    pub filters: &'static [FilterField],
}

/// One page of entities plus the total count matching the same predicates.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Escape LIKE metacharacters so a contains filter matches the literal
/// substring rather than treating `%`/`_` as wildcards.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl EntityQuery {
    /// Scope predicate with `$idx` as the organization placeholder, if scoped.
    fn scope_predicate(&self, idx: usize) -> Option<String> {
        match self.scope {
            TenantScope::Unscoped => None,
            TenantScope::Column(column) => Some(format!("{} = ${}", column, idx)),
            TenantScope::ParentOrg {
                fk_column,
                parent_table,
            } => Some(format!(
                "{} IN (SELECT id FROM {} WHERE organization_id = ${})",
                fk_column, parent_table, idx
            )),
        }
    }

    /// Build WHERE conditions for the scope + filters, placeholders starting
    /// at `$1` (organization first when scoped, then filter values in order).
    ///
    /// Filter keys outside the whitelist are rejected; the original
    /// pass-through escape hatch is deliberately not reproduced.
    fn conditions(&self, scoped: bool, filters: &[(String, String)]) -> Result<Vec<String>> {
        let mut conds = Vec::with_capacity(filters.len() + 1);
        let mut next = 1;

        if scoped {
            if let Some(pred) = self.scope_predicate(next) {
                conds.push(pred);
                next += 1;
            }
        }

        for (name, _) in filters {
            let field = self
                .filters
                .iter()
                .find(|f| f.name == name)
                .ok_or_else(|| Error::Validation(format!("Unknown filter field: {}", name)))?;
            let cond = match field.kind {
                MatchKind::Exact => format!("{}::text = ${}", field.column, next),
                MatchKind::Contains => {
                    format!("{} LIKE '%' || ${} || '%' ESCAPE '\\'", field.column, next)
                }
            };
            conds.push(cond);
            next += 1;
        }

        Ok(conds)
    }

    /// Build the page-fetch and count statements. Both share identical
    /// predicates so `total` counts exactly what the page is drawn from.
    fn list_statements(
        &self,
        scoped: bool,
        filters: &[(String, String)],
    ) -> Result<(String, String)> {
        let conds = self.conditions(scoped, filters)?;
        let where_sql = if conds.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conds.join(" AND "))
        };
        let next = conds.len() + 1;

        let select = format!(
            "SELECT {} FROM {}{} ORDER BY {} DESC LIMIT ${} OFFSET ${}",
            self.columns,
            self.table,
            where_sql,
            self.order_by,
            next,
            next + 1
        );
        let count = format!("SELECT COUNT(*) FROM {}{}", self.table, where_sql);

        Ok((select, count))
    }

    /// Build the scoped single-row fetch statement (`$1` = id, `$2` = org
    /// when scoped).
    fn get_statement(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            self.columns, self.table, self.id_column
        );
        if let Some(pred) = self.scope_predicate(2) {
            sql.push_str(" AND ");
            sql.push_str(&pred);
        }
        sql
    }

    /// Bind values for the filters, in input order. Contains values are
    /// escaped so they match literally under the `ESCAPE '\'` clause built
    /// by [`conditions`](Self::conditions).
    fn filter_values(&self, filters: &[(String, String)]) -> Result<Vec<String>> {
        filters
            .iter()
            .map(|(name, value)| {
                let field = self
                    .filters
                    .iter()
                    .find(|f| f.name == name)
                    .ok_or_else(|| Error::Validation(format!("Unknown filter field: {}", name)))?;
                Ok(match field.kind {
                    MatchKind::Exact => value.clone(),
                    MatchKind::Contains => escape_like(value),
                })
            })
            .collect()
    }

    /// Require an organization id exactly when the entity is scoped.
    fn check_scope_arg(&self, org: Option<Uuid>) -> Result<bool> {
        match (self.scope, org) {
            (TenantScope::Unscoped, _) => Ok(false),
            (_, Some(_)) => Ok(true),
            (_, None) => Err(Error::Internal(
                "Tenant scope required for scoped entity query".to_string(),
            )),
        }
    }
}

/// Fetch one page of entities plus the total matching count.
///
/// The page fetch and the count are two independent statements with identical
/// predicates; they are not wrapped in a shared snapshot, so under concurrent
/// writes `total` may drift from the returned page. Accepted weak
/// consistency, stated here rather than papered over.
pub async fn fetch_page<E>(
    pool: &PgPool,
    query: &EntityQuery,
    org: Option<Uuid>,
    pagination: Pagination,
    filters: &[(String, String)],
) -> Result<Page<E>>
where
    E: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let scoped = query.check_scope_arg(org)?;
    let (select_sql, count_sql) = query.list_statements(scoped, filters)?;
    let values = query.filter_values(filters)?;

    let page = pagination.page();
    let limit = pagination.limit();

    let mut select = sqlx::query_as::<_, E>(&select_sql);
    if scoped {
        select = select.bind(org);
    }
    for value in &values {
        select = select.bind(value.clone());
    }
    select = select.bind(limit).bind(pagination.offset());
    let items = select.fetch_all(pool).await?;

    let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
    if scoped {
        count = count.bind(org);
    }
    for value in &values {
        count = count.bind(value.clone());
    }
    let total = count.fetch_one(pool).await?;

    Ok(Page {
        items,
        total,
        page,
        limit,
    })
}

/// Fetch a single entity only if it matches the tenant scope.
pub async fn fetch_scoped<E>(
    pool: &PgPool,
    query: &EntityQuery,
    id: Uuid,
    org: Option<Uuid>,
) -> Result<Option<E>>
where
    E: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let scoped = query.check_scope_arg(org)?;
    let sql = query.get_statement();

    let mut fetch = sqlx::query_as::<_, E>(&sql).bind(id);
    if scoped {
        fetch = fetch.bind(org);
    }
    let row = fetch.fetch_optional(pool).await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECT: EntityQuery = EntityQuery {
        table: "projects",
        columns: "id, organization_id, name, created_at, updated_at",
        id_column: "id",
        order_by: "created_at",
        scope: TenantScope::Column("organization_id"),
        filters: &[FilterField {
            name: "name",
            column: "name",
            kind: MatchKind::Contains,
        }],
    };

    const TRANSITIVE: EntityQuery = EntityQuery {
        table: "tasks t LEFT JOIN projects p ON p.id = t.project_id",
        columns: "t.id, t.project_id, t.status",
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

    const UNSCOPED: EntityQuery = EntityQuery {
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

    #[test]
    fn test_direct_scope_list_statements() {
        let (select, count) = DIRECT.list_statements(true, &[]).unwrap();
        assert_eq!(
            select,
            "SELECT id, organization_id, name, created_at, updated_at FROM projects \
             WHERE organization_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            count,
            "SELECT COUNT(*) FROM projects WHERE organization_id = $1"
        );
    }

    #[test]
    fn test_contains_filter_predicate() {
        let filters = vec![("name".to_string(), "api".to_string())];
        let (select, count) = DIRECT.list_statements(true, &filters).unwrap();
        assert!(select.contains("organization_id = $1"));
        assert!(select.contains("name LIKE '%' || $2 || '%' ESCAPE '\\'"));
        assert!(select.ends_with("LIMIT $3 OFFSET $4"));
        assert!(count.contains("name LIKE '%' || $2 || '%' ESCAPE '\\'"));
    }

    #[test]
    fn test_contains_filter_value_escapes_like_metacharacters() {
        // "a%b" must match only the literal string, not act as a wildcard
        let filters = vec![("name".to_string(), "a%b".to_string())];
        let values = DIRECT.filter_values(&filters).unwrap();
        assert_eq!(values, vec!["a\\%b".to_string()]);

        let filters = vec![("name".to_string(), "under_score \\ 100%".to_string())];
        let values = DIRECT.filter_values(&filters).unwrap();
        assert_eq!(values, vec!["under\\_score \\\\ 100\\%".to_string()]);
    }

    #[test]
    fn test_exact_filter_value_passes_through_unescaped() {
        let filters = vec![("status".to_string(), "in_progress".to_string())];
        let values = TRANSITIVE.filter_values(&filters).unwrap();
        assert_eq!(values, vec!["in_progress".to_string()]);
    }

    #[test]
    fn test_filter_values_rejects_unknown_field() {
        let filters = vec![("role".to_string(), "admin".to_string())];
        let err = DIRECT.filter_values(&filters).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_transitive_scope_uses_parent_subquery() {
        let filters = vec![("status".to_string(), "open".to_string())];
        let (select, count) = TRANSITIVE.list_statements(true, &filters).unwrap();
        assert!(select.contains(
            "t.project_id IN (SELECT id FROM projects WHERE organization_id = $1)"
        ));
        assert!(select.contains("t.status::text = $2"));
        assert!(count.contains(
            "t.project_id IN (SELECT id FROM projects WHERE organization_id = $1)"
        ));
    }

    #[test]
    fn test_unscoped_list_statements() {
        let (select, count) = UNSCOPED.list_statements(false, &[]).unwrap();
        assert_eq!(
            select,
            "SELECT id, name, created_at, updated_at FROM organizations \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        assert_eq!(count, "SELECT COUNT(*) FROM organizations");
    }

    #[test]
    fn test_select_and_count_share_predicates() {
        let filters = vec![("status".to_string(), "done".to_string())];
        let (select, count) = TRANSITIVE.list_statements(true, &filters).unwrap();
        let where_from_select = select
            .split(" WHERE ")
            .nth(1)
            .and_then(|rest| rest.split(" ORDER BY ").next())
            .unwrap();
        let where_from_count = count.split(" WHERE ").nth(1).unwrap();
        assert_eq!(where_from_select, where_from_count);
    }

    #[test]
    fn test_unknown_filter_field_rejected() {
        let filters = vec![("role".to_string(), "admin".to_string())];
        let err = DIRECT.list_statements(true, &filters).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("Unknown filter field: role"));
    }

    #[test]
    fn test_get_statement_direct_scope() {
        assert_eq!(
            DIRECT.get_statement(),
            "SELECT id, organization_id, name, created_at, updated_at FROM projects \
             WHERE id = $1 AND organization_id = $2"
        );
    }

    #[test]
    fn test_get_statement_transitive_scope() {
        assert_eq!(
            TRANSITIVE.get_statement(),
            "SELECT t.id, t.project_id, t.status FROM tasks t LEFT JOIN projects p \
             ON p.id = t.project_id WHERE t.id = $1 AND t.project_id IN \
             (SELECT id FROM projects WHERE organization_id = $2)"
        );
    }

    #[test]
    fn test_get_statement_unscoped() {
        assert_eq!(
            UNSCOPED.get_statement(),
            "SELECT id, name, created_at, updated_at FROM organizations WHERE id = $1"
        );
    }

    #[test]
    fn test_scope_arg_required_for_scoped_entity() {
        let err = DIRECT.check_scope_arg(None).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        assert!(DIRECT.check_scope_arg(Some(Uuid::new_v4())).unwrap());
        assert!(!UNSCOPED.check_scope_arg(None).unwrap());
        // Unscoped entities ignore a passed organization rather than widening
        // the predicate
        assert!(!UNSCOPED.check_scope_arg(Some(Uuid::new_v4())).unwrap());
    }
}
