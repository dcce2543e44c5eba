//! Route definitions for Tenancy domain API

use axum::{routing::get, Router};

use super::handlers::{organizations, users};
use super::middleware::TenancyState;

/// Create organization routes
fn organization_routes() -> Router<TenancyState> {
    Router::new()
        .route(
            "/v1/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/v1/organizations/{id}",
            get(organizations::get_organization)
                .patch(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
}

/// Create user routes
fn user_routes() -> Router<TenancyState> {
    Router::new()
        .route(
            "/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/v1/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create all Tenancy domain API routes
pub fn routes() -> Router<TenancyState> {
    Router::new()
        .merge(organization_routes())
        .merge(user_routes())
}
