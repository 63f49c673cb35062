pub mod extractors;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::{Role, User};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use gate::{authorize, bearer_token, AccessGate, MAX_TOKEN_LEN};
pub use middleware::{AuthMiddleware, RequireRole};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

const ALL_FIELDS_REQUIRED: &str = "All fields are required.";

/// Represents the payload for a new user registration request.
///
/// Fields are optional at the serde level so that a missing field surfaces as
/// a validation error.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, message = "All fields are required.")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, message = "All fields are required.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, message = "All fields are required.")
    )]
    pub password: Option<String>,
    /// `Admin` or `User`; defaults to `User` when omitted.
    pub role: Option<String>,
}

impl SignupRequest {
    /// Validates the payload and builds the user record with a hashed password.
    pub fn into_user(self) -> Result<User, AppError> {
        self.validate()?;
        let role = match self.role.as_deref() {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };
        match (self.username, self.email, self.password) {
            (Some(username), Some(email), Some(password)) => {
                let password_hash = hash_password(&password)?;
                Ok(User::new(username, email, password_hash, role))
            }
            _ => Err(AppError::ValidationError(ALL_FIELDS_REQUIRED.into())),
        }
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, message = "All fields are required.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields are required."),
        length(min = 1, message = "All fields are required.")
    )]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)` once both are present.
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        self.validate()?;
        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::ValidationError(ALL_FIELDS_REQUIRED.into())),
        }
    }
}

/// Body returned by a successful signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: User,
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// The JWT for session authentication.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: Some("test@example.com".to_string()),
            password: Some("password123".to_string()),
        };
        assert_eq!(
            valid_login.into_credentials().unwrap(),
            ("test@example.com".to_string(), "password123".to_string())
        );

        let missing_password = LoginRequest {
            email: Some("test@example.com".to_string()),
            password: None,
        };
        assert!(matches!(
            missing_password.into_credentials(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            username: Some("test_user".to_string()),
            email: Some("test@example.com".to_string()),
            password: Some("password123".to_string()),
            role: None,
        };
        let user = valid.into_user().unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "password123");
        assert!(verify_password("password123", &user.password_hash).unwrap());

        let missing_username = SignupRequest {
            username: None,
            email: Some("test@example.com".to_string()),
            password: Some("password123".to_string()),
            role: Some("Admin".to_string()),
        };
        assert!(matches!(
            missing_username.into_user(),
            Err(AppError::ValidationError(msg)) if msg.contains("username")
        ));

        let empty_email = SignupRequest {
            username: Some("test_user".to_string()),
            email: Some(String::new()),
            password: Some("password123".to_string()),
            role: None,
        };
        assert!(empty_email.into_user().is_err());
    }

    #[test]
    fn test_signup_keeps_requested_role() {
        let admin = SignupRequest {
            username: Some("boss".to_string()),
            email: Some("boss@example.com".to_string()),
            password: Some("password123".to_string()),
            role: Some("Admin".to_string()),
        };
        assert_eq!(admin.into_user().unwrap().role, Role::Admin);

        let unknown = SignupRequest {
            username: Some("boss".to_string()),
            email: Some("boss@example.com".to_string()),
            password: Some("password123".to_string()),
            role: Some("Owner".to_string()),
        };
        assert!(matches!(
            unknown.into_user(),
            Err(AppError::ValidationError(msg)) if msg.contains("Owner")
        ));
    }
}
