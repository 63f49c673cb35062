use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The caller's claims, as attached to the request by `AuthMiddleware`.
///
/// Only usable on routes behind `AuthMiddleware`; elsewhere extraction fails
/// with `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = AppError::Unauthorized(
                    "Caller identity not found in request. Ensure AuthMiddleware is active."
                        .to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Admin,
            iat: 0,
            exp: 0,
        };
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims.clone());

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert_eq!(extracted.unwrap().0, claims);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
