use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use kanban::{routes, AppState, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let state = AppState::from_config(&config).await.map_err(|e| {
        log::error!("failed to initialise storage: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let state = web::Data::new(state);

    log::info!("Starting Kanban board server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::configure(state.gate()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
