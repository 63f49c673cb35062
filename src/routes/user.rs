use crate::{
    auth::{
        bearer_token, verify_password, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
    },
    error::AppError,
    models::RevokedToken,
    state::AppState,
};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Hashes the password, stores the account and returns it (without the hash).
///
/// ## Responses:
/// - `201 Created`: `{message, user}`.
/// - `500 Internal Server Error`: missing fields, an unknown role, an email that
///   is already registered, or a store failure. The message is echoed in `error`.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let user = payload.into_inner().into_user()?;
    state.users.insert_user(&user).await?;

    log::info!("registered user {} with role {}", user.id, user.role);

    Ok(HttpResponse::Created().json(SignupResponse {
        message: "user registered successfully".into(),
        user,
    }))
}

/// Login user
///
/// Checks the password and returns a token valid for one hour.
///
/// ## Responses:
/// - `201 Created`: `{message, token}`.
/// - `401 Unauthorized`: the password does not match.
/// - `404 Not Found`: no user has this email.
/// - `500 Internal Server Error`: missing fields or a store failure.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = payload.into_inner().into_credentials()?;

    let user = state
        .users
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("user does not exist try signing up!".into()))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Incorrect credentials".into()));
    }

    let token = state.tokens.issue(user.id, user.role)?;
    log::info!("user {} logged in", user.id);

    Ok(HttpResponse::Created().json(LoginResponse {
        message: "user login successfully".into(),
        token,
    }))
}

/// Logout user
///
/// Adds the presented token to the revocation list. The token itself is not
/// verified; any presented credential is revoked.
///
/// ## Responses:
/// - `200 OK`: `{message}`.
/// - `401 Unauthorized`: no credential in the `Authorization` header.
/// - `500 Internal Server Error`: store failure.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(auth_header).ok_or_else(|| {
        AppError::Unauthorized("Invalid or missing authorization header".into())
    })?;

    state.revocations.revoke(&RevokedToken::new(token)).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Logout successful."
    })))
}
