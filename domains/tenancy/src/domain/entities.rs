//! Domain entities for the Tenancy domain
//!
//! Organizations are the tenancy root; users belong to exactly one
//! organization and carry the role consumed by authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_common::{Error, Result};

/// Maximum organization/user name length (varchar(200))
const MAX_NAME_LENGTH: usize = 200;

/// Maximum email length (varchar(320))
const MAX_EMAIL_LENGTH: usize = 320;

/// User role — matches the `user_role` DB enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Member => write!(f, "member"),
        }
    }
}

/// Organization entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new organization
    pub fn new(name: String) -> Result<Self> {
        validate_name(&name)?;

        let now = Utc::now();
        Ok(Organization {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        })
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user inside an organization
    pub fn new(
        organization_id: Uuid,
        email: String,
        name: Option<String>,
        role: UserRole,
    ) -> Result<Self> {
        validate_email(&email)?;
        if let Some(ref n) = name {
            validate_name(n)?;
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            organization_id,
            email,
            name,
            role,
            created_at: now,
            updated_at: now,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Name is required".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(Error::Validation(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !email.contains('@') {
        return Err(Error::Validation("Email must contain '@'".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Member.to_string(), "member");
    }

    #[test]
    fn test_role_default_is_member() {
        assert_eq!(UserRole::default(), UserRole::Member);
    }

    #[test]
    fn test_role_serialization_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&UserRole::Member).unwrap(),
            "\"member\""
        );
    }

    #[test]
    fn test_organization_creation() {
        let org = Organization::new("Acme".to_string()).unwrap();
        assert_eq!(org.name, "Acme");
        assert_eq!(org.created_at, org.updated_at);
    }

    #[test]
    fn test_organization_name_empty_rejected() {
        let result = Organization::new("".to_string());
        assert!(result.is_err());

        let result = Organization::new("   ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_organization_name_200_chars_valid() {
        let name = "a".repeat(200);
        assert!(Organization::new(name).is_ok());
    }

    #[test]
    fn test_organization_name_201_chars_rejected() {
        let name = "a".repeat(201);
        let result = Organization::new(name);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 200"));
    }

    #[test]
    fn test_user_creation() {
        let org_id = Uuid::new_v4();
        let user = User::new(
            org_id,
            "dev@acme.io".to_string(),
            Some("Dev".to_string()),
            UserRole::Member,
        )
        .unwrap();

        assert_eq!(user.organization_id, org_id);
        assert_eq!(user.email, "dev@acme.io");
        assert_eq!(user.name.as_deref(), Some("Dev"));
        assert_eq!(user.role, UserRole::Member);
    }

    #[test]
    fn test_user_email_without_at_rejected() {
        let result = User::new(Uuid::new_v4(), "not-an-email".to_string(), None, UserRole::Member);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'@'"));
    }

    #[test]
    fn test_user_email_empty_rejected() {
        let result = User::new(Uuid::new_v4(), "".to_string(), None, UserRole::Member);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_email_too_long_rejected() {
        let email = format!("{}@x.io", "a".repeat(320));
        let result = User::new(Uuid::new_v4(), email, None, UserRole::Member);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 320"));
    }

    #[test]
    fn test_user_name_optional() {
        let user = User::new(
            Uuid::new_v4(),
            "dev@acme.io".to_string(),
            None,
            UserRole::Admin,
        )
        .unwrap();
        assert!(user.name.is_none());
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn test_user_serialization_roundtrip() {
        let user = User::new(
            Uuid::new_v4(),
            "dev@acme.io".to_string(),
            Some("Dev".to_string()),
            UserRole::Admin,
        )
        .unwrap();

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();

        assert_eq!(user, deserialized);
    }
}
