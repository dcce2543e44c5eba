//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns the identity lookup SQL. Uses
//! runtime `sqlx::query_as` (not macros), consistent with the domain
//! repositories.

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::{AuthContext, AuthIdentity};
use crate::error::AuthError;
use crate::jwt::validate_jwt_token;

/// Concrete authentication backend.
///
/// Wraps a database pool and auth configuration. Validates tokens and loads
/// the caller's identity row (organization, role) for tenancy decisions.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Find caller identity by ID — lightweight subset of the users table
    pub(crate) async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let identity: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, organization_id, email, name, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user identity");
            AuthError::UserLoadError
        })?;

        Ok(identity)
    }

    /// Authenticate a JWT and build the caller's context.
    pub async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = validate_jwt_token(token, &self.config)?;

        let user_id: Uuid = claims.sub.parse().map_err(|_| AuthError::InvalidUserId)?;

        let identity = self
            .find_identity(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthContext::new(identity))
    }
}
