use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Access level embedded in every issued token.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    /// May delete tasks.
    Admin,
    /// Regular board member.
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Admin" => Ok(Role::Admin),
            "User" => Ok(Role::User),
            other => Err(AppError::ValidationError(format!(
                "`{}` is not a valid role (Admin, User)",
                other
            ))),
        }
    }
}

/// A registered account as stored in the credential store.
///
/// The password hash is never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new account record. `password_hash` must already be hashed.
    pub fn new(username: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"Superuser\"").is_err());
    }

    #[test]
    fn test_role_from_request_string() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            "admin".parse::<Role>(),
            Err(AppError::ValidationError(msg)) if msg.contains("admin")
        ));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "$2b$10$hash".into(),
            Role::User,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["role"], "User");
    }
}
