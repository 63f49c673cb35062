#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;
use uuid::Uuid;

use kanban::auth::{LoginResponse, TokenService};
use kanban::models::Role;
use kanban::routes::{self, health};
use kanban::store::MemoryStore;
use kanban::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Shared state backed by a fresh in-memory store. The store handle is
/// returned too so tests can inspect what was persisted.
pub fn test_state() -> (web::Data<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(store.clone(), TokenService::new(TEST_SECRET));
    (web::Data::new(state), store)
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let gate = state.gate();
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::configure(gate)),
    )
    .await
}

/// Mints a token directly, skipping signup/login.
pub fn token_for(state: &AppState, role: Role) -> String {
    state.tokens.issue(Uuid::new_v4(), role).unwrap()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers a user through the API and returns a token obtained by logging in.
pub async fn signup_and_login<S, B>(
    app: &S,
    email: &str,
    password: &str,
    role: &str,
) -> Result<String, String>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/user/signup")
        .set_json(json!({
            "username": email.split('@').next().unwrap_or(email),
            "email": email,
            "password": password,
            "role": role
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    if resp.status() != StatusCode::CREATED {
        return Err(format!("signup failed with {}", resp.status()));
    }

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    if resp.status() != StatusCode::CREATED {
        return Err(format!("login failed with {}", resp.status()));
    }
    let body: LoginResponse = test::read_body_json(resp).await;
    Ok(body.token)
}

/// Creates a task through the API and returns its id.
pub async fn create_task<S, B>(app: &S, token: &str, title: &str) -> Uuid
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/todo/task")
        .append_header(bearer(token))
        .set_json(json!({ "title": title, "description": format!("{} details", title) }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "creating {:?}", title);
    let body: kanban::routes::tasks::TaskCreated = test::read_body_json(resp).await;
    body.task.id
}
