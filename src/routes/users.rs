use crate::{
    auth::{credentials, token, AuthSession, LoginRequest, SignupRequest, AUTH_HEADER},
    config::Config,
    error::AppError,
    models::PublicUser,
    store::Store,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Create a new user account.
///
/// On success the response body is the public user and the `x-auth` header
/// carries a freshly issued session token, so signup doubles as a login.
#[post("/users")]
pub async fn signup(
    store: web::Data<Store>,
    config: web::Data<Config>,
    body: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let user = credentials::signup(&store, &body.email, &body.password).await?;
    let session_token = token::issue_token(&store, &config, user.id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((AUTH_HEADER, session_token))
        .json(PublicUser::from(&user)))
}

/// Verify credentials and issue a new session token.
///
/// Each login appends a token; earlier sessions stay valid. A credential
/// failure is a 400 here (the session routes use 401 — a deliberate
/// asymmetry kept from the reference contract).
#[post("/users/login")]
pub async fn login(
    store: web::Data<Store>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = credentials::verify_credentials(&store, &body.email, &body.password).await?;
    let session_token = token::issue_token(&store, &config, user.id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((AUTH_HEADER, session_token))
        .json(PublicUser::from(&user)))
}

/// Return the caller's own user record.
#[get("")]
pub async fn me(session: AuthSession) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(PublicUser::from(&session.user)))
}

/// Revoke the session token this request was authenticated with.
#[delete("/token")]
pub async fn logout(
    store: web::Data<Store>,
    session: AuthSession,
) -> Result<impl Responder, AppError> {
    token::revoke_token(&store, session.user.id, &session.token).await?;
    Ok(HttpResponse::Ok().finish())
}
