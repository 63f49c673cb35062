use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;

/// How long an issued token stays valid.
pub const TOKEN_VALIDITY_SECS: i64 = 60 * 60;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Role the user had when the token was issued.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    BadSignature,
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token has expired"),
            TokenError::BadSignature => write!(f, "signature does not match"),
            TokenError::Malformed => write!(f, "token is malformed"),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and verifies HS256 tokens with a shared secret.
///
/// Cheap to clone; the keys are shared.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            validation,
        }
    }

    /// Generates a token for `user_id` carrying `role`, valid for one hour.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_VALIDITY_SECS)).timestamp(),
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims with this service's secret.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.keys.encoding,
        )
        .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry and returns the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
