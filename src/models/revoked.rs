use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A token that was explicitly invalidated before its natural expiry.
///
/// The token string is stored verbatim and is the lookup key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RevokedToken {
    pub token: String,
    /// Moment the token was revoked (logout time), not the token's own expiry.
    pub revoked_at: DateTime<Utc>,
}

impl RevokedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            revoked_at: Utc::now(),
        }
    }
}
