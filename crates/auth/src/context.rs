//! Authorization context for authenticated callers

use uuid::Uuid;

/// User role — matches the `user_role` DB enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    Admin,
    Member,
}

/// Authenticated identity — lightweight read model of the users table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: AuthRole,
}

/// Represents an authenticated caller context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    /// The organization every scoped query for this caller is bound to
    pub fn organization_id(&self) -> Uuid {
        self.user.organization_id
    }

    /// Check if caller has the admin role
    pub fn is_admin(&self) -> bool {
        self.user.role == AuthRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: AuthRole) -> AuthIdentity {
        AuthIdentity {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            name: None,
            role,
        }
    }

    #[test]
    fn test_admin_role_check() {
        let ctx = AuthContext::new(identity(AuthRole::Admin));
        assert!(ctx.is_admin());

        let ctx = AuthContext::new(identity(AuthRole::Member));
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_organization_id_comes_from_identity() {
        let user = identity(AuthRole::Member);
        let org = user.organization_id;
        let ctx = AuthContext::new(user);
        assert_eq!(ctx.organization_id(), org);
    }

    #[test]
    fn test_role_serialization_lowercase() {
        assert_eq!(serde_json::to_string(&AuthRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&AuthRole::Member).unwrap(),
            "\"member\""
        );
    }
}
