use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The identity attached to a request by `AuthMiddleware`: the resolved user
/// and the raw token string the request arrived with (the logout handler
/// needs the latter to revoke exactly that token).
///
/// Extracting this on a route that is not behind `AuthMiddleware` yields a
/// 401, which is a safe default for a wiring mistake.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

impl FromRequest for AuthSession {
    type Error = ActixError; // AppError converts via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthSession>().cloned() {
            Some(session) => ready(Ok(session)),
            None => {
                let err = AppError::Unauthorized("no session attached to request".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
