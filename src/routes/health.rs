use actix_web::{get, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe for the board frontend. Needs no token.
#[get("/")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ServerStatus {
        message: "server is up".into(),
        timestamp: Utc::now(),
    })
}
