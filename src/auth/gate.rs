//! Request authentication and role checks.
//!
//! The gate runs three checks in a fixed order: the credential must be present,
//! it must not be on the revocation list, and it must verify against the token
//! service. Revocation is looked up before the signature so that a revoked token
//! is refused even while its signature is still valid.

use std::sync::Arc;

use crate::auth::token::{Claims, TokenService};
use crate::error::AppError;
use crate::models::Role;
use crate::store::RevocationStore;

const BEARER_PREFIX: &str = "Bearer ";

/// Longest credential accepted. Issued tokens are a few hundred bytes; anything
/// longer is never looked up or stored in the revocation list.
pub const MAX_TOKEN_LEN: usize = 2048;

/// Extracts the raw token from an `Authorization` header value.
///
/// The `Bearer ` scheme prefix is optional. Returns `None` when the header is
/// absent, carries nothing after the prefix, or is longer than [`MAX_TOKEN_LEN`].
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?.trim_start();
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() || token.len() > MAX_TOKEN_LEN {
        None
    } else {
        Some(token)
    }
}

/// Decides whether a request carries a valid, non-revoked token.
#[derive(Clone)]
pub struct AccessGate {
    tokens: TokenService,
    revocations: Arc<dyn RevocationStore>,
}

impl AccessGate {
    pub fn new(tokens: TokenService, revocations: Arc<dyn RevocationStore>) -> Self {
        Self {
            tokens,
            revocations,
        }
    }

    /// Authenticates the value of an `Authorization` header.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Claims, AppError> {
        let token = bearer_token(header)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized. Token missing.".into()))?;

        if self.revocations.is_revoked(token).await? {
            return Err(AppError::Unauthorized("Unauthorized. Token revoked.".into()));
        }

        let claims = self.tokens.verify(token)?;
        Ok(claims)
    }
}

/// Checks the role attached by [`AccessGate::authenticate`] against `required`.
pub fn authorize(claims: Option<&Claims>, required: Role) -> Result<(), AppError> {
    match claims {
        None => Err(AppError::Unauthorized("Unauthorized. Token missing.".into())),
        Some(claims) if claims.role == required => Ok(()),
        Some(claims) => Err(AppError::Forbidden(format!(
            "{} role required, caller has {}",
            required, claims.role
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevokedToken;
    use crate::store::MemoryStore;
    use uuid::Uuid;

    fn gate() -> (AccessGate, TokenService, Arc<MemoryStore>) {
        let tokens = TokenService::new("gate-test-secret");
        let store = Arc::new(MemoryStore::new());
        (AccessGate::new(tokens.clone(), store.clone()), tokens, store)
    }

    #[test]
    fn test_bearer_prefix_is_optional() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_oversized_credential_is_treated_as_missing() {
        let longest = "a".repeat(MAX_TOKEN_LEN);
        assert_eq!(bearer_token(Some(longest.as_str())), Some(longest.as_str()));

        let oversized = format!("Bearer {}", "a".repeat(MAX_TOKEN_LEN + 1));
        assert_eq!(bearer_token(Some(oversized.as_str())), None);
    }

    #[actix_rt::test]
    async fn test_authenticate_accepts_both_header_forms() {
        let (gate, tokens, _) = gate();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, Role::User).unwrap();

        let claims = gate.authenticate(Some(token.as_str())).await.unwrap();
        assert_eq!(claims.sub, user_id);

        let header = format!("Bearer {}", token);
        let claims = gate.authenticate(Some(header.as_str())).await.unwrap();
        assert_eq!(claims.role, Role::User);
    }

    #[actix_rt::test]
    async fn test_authenticate_rejects_missing_and_invalid() {
        let (gate, _, _) = gate();

        match gate.authenticate(None).await {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("missing")),
            other => panic!("expected missing token rejection, got {:?}", other),
        }

        let foreign = TokenService::new("other-secret")
            .issue(Uuid::new_v4(), Role::Admin)
            .unwrap();
        assert!(matches!(
            gate.authenticate(Some(foreign.as_str())).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_rt::test]
    async fn test_revocation_wins_over_valid_signature() {
        let (gate, tokens, store) = gate();
        let token = tokens.issue(Uuid::new_v4(), Role::Admin).unwrap();
        assert!(gate.authenticate(Some(token.as_str())).await.is_ok());

        store.revoke(&RevokedToken::new(token.clone())).await.unwrap();

        let header = format!("Bearer {}", token);
        match gate.authenticate(Some(header.as_str())).await {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("revoked")),
            other => panic!("expected revoked token rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_roles() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::User,
            iat: 0,
            exp: 0,
        };
        assert!(matches!(
            authorize(Some(&claims), Role::Admin),
            Err(AppError::Forbidden(_))
        ));
        assert!(authorize(Some(&claims), Role::User).is_ok());
        assert!(matches!(
            authorize(None, Role::Admin),
            Err(AppError::Unauthorized(_))
        ));
    }
}
