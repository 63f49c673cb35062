#![doc = "The `kanban` library crate."]
#![doc = ""]
#![doc = "Domain models, stores, authentication (token service, revocation list and"]
#![doc = "access gate), routing configuration and error handling for the Kanban board"]
#![doc = "backend. The binary (`main.rs`) wires these into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
