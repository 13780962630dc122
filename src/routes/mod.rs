pub mod auth;
pub mod health;
pub mod todo;

use actix_web::{middleware::Condition, web};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;

/// Registers shared state, extractor error handlers and every route.
///
/// Usage: `App::new().configure(routes::configure(state))`.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(state.todos.clone()))
            .app_data(web::Data::from(state.auth.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
            }))
            .service(health::health)
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login),
            )
            .service(
                web::scope("/api/todo")
                    .wrap(Condition::new(
                        state.require_auth,
                        AuthMiddleware::new(state.tokens.clone()),
                    ))
                    .service(todo::get_todos)
                    .service(todo::create_todo)
                    .service(todo::get_todo)
                    .service(todo::update_todo)
                    .service(todo::delete_todo),
            );
    }
}
