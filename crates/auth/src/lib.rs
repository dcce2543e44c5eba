//! Authentication middleware for the TaskHub API
//!
//! Provides JWT validation and axum extractors that work with any domain
//! state implementing `FromRef<S>` for `AuthBackend`. Claims carry only the
//! caller's user id; organization membership and role are loaded from the
//! store so tenancy decisions always reflect current data.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;

pub use backend::AuthBackend;
pub use claims::AccessClaims;
pub use config::AuthConfig;
pub use context::{AuthContext, AuthIdentity, AuthRole};
pub use error::AuthError;
pub use extractors::{AdminUser, AuthUser};
