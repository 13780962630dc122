use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `200 OK`: `"registered"`.
/// - `400 Bad Request`: missing/blank username or password, or username too long.
/// - `409 Conflict`: the username is taken.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    service.register(&register_data).await?;

    Ok(HttpResponse::Ok().json("registered"))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: missing/blank username or password.
/// - `401 Unauthorized`: unknown username or wrong password (indistinguishable).
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let token = service.login(&login_data).await?;

    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::config::JwtConfig;
    use crate::models::User;
    use crate::store::MemoryRepository;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;

    #[actix_rt::test]
    async fn test_register_and_login_validation() {
        let tokens = Arc::new(TokenService::new(&JwtConfig {
            secret: "routes-auth-test".into(),
            issuer: "todo-api".into(),
            audience: "todo-api-clients".into(),
            ttl_minutes: 30,
        }));
        let service = web::Data::new(AuthService::new(
            Arc::new(MemoryRepository::<User>::new()),
            tokens,
        ));
        let app = test::init_service(
            App::new()
                .app_data(service)
                .service(register)
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "", "password": "secret" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
