//! Tenancy domain: organizations and the users that belong to them

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Organization, User, UserRole};

// Re-export repository types
pub use repository::{OrganizationRepository, TenancyRepositories, UserRepository};

// Re-export API types
pub use api::routes;
pub use api::TenancyState;
