pub mod health;
pub mod tasks;
pub mod user;

use actix_web::web;

use crate::auth::{AccessGate, AuthMiddleware};
use crate::error::AppError;

/// Registers the `/user` and `/todo` scopes.
///
/// Everything under `/todo` runs behind `gate`; signup, login and logout do not.
pub fn configure(gate: AccessGate) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(err.to_string()).into()
        }))
        .service(
            web::scope("/user")
                .service(user::signup)
                .service(user::login)
                .service(user::logout),
        )
        .service(
            web::scope("/todo")
                .wrap(AuthMiddleware::new(gate))
                .service(tasks::create_task)
                .service(tasks::list_tasks)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}
