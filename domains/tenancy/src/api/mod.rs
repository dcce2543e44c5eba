//! API layer for the Tenancy domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TenancyState;
pub use routes::routes;
