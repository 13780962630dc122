use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use log::{error, info};
use std::io;

use todo_api::{config::Config, routes, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = AppState::from_config(&config).await.map_err(|e| {
        error!("failed to initialise storage: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    if !config.require_auth {
        info!("REQUIRE_AUTH is off; /api/todo accepts unauthenticated requests");
    }
    info!("Starting todo API at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
