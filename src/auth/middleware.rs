//!
//! # Auth Gatekeeper
//!
//! Request-boundary guard for protected scopes. Pulls the session token from
//! the `x-auth` header, runs the full dual validation (signature + revocation
//! list) against the store, and either attaches the resolved identity to the
//! request or short-circuits with 401 before the inner service ever runs.
//! The guard keeps no state of its own between invocations.

use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthSession;
use crate::auth::token::validate_token;
use crate::auth::AUTH_HEADER;
use crate::config::Config;
use crate::error::AppError;
use crate::store::Store;

pub struct AuthMiddleware;

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
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc so the guard can await the store lookup before forwarding.
    service: Rc<S>,
}

/// Resolves the request's token against the store. Split out so the guard's
/// `call` stays a thin wrapper around success/short-circuit plumbing.
async fn authenticate(req: &ServiceRequest) -> Result<AuthSession, AppError> {
    let token = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("missing token".into()))?;

    let store = req
        .app_data::<web::Data<Store>>()
        .ok_or_else(|| AppError::Internal("store not configured".into()))?;
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Internal("config not configured".into()))?;

    let (user, _access) = validate_token(store, config, &token).await?;
    Ok(AuthSession { user, token })
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
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req).await {
                Ok(session) => {
                    req.extensions_mut().insert(session);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(app_err) => {
                    // Short-circuit: the downstream handler never runs.
                    let response = app_err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
