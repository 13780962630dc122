use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Rejects requests that do not carry a valid `Authorization: Bearer <token>` header.
///
/// On success the verified [`Claims`](crate::auth::Claims) are inserted into the
/// request extensions. Rejections are rendered as 401 JSON responses.
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = match bearer_token(&req) {
            Some(token) => self.tokens.verify(token),
            None => Err(AppError::Unauthorized("Missing token".into())),
        };

        match verified {
            Ok(claims) => {
                log::debug!("authenticated request from user {}", claims.name);
                req.extensions_mut().insert(claims);
                let service = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(app_err) => {
                log::warn!("rejected {} {}: {}", req.method(), req.path(), app_err);
                Box::pin(async move { Ok(req.error_response(app_err).map_into_right_body()) })
            }
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
