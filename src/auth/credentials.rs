//!
//! # Credential Store
//!
//! Owns user identity and password verification. Passwords are persisted only
//! as bcrypt derivations and recomputed at verification time, never reversed.

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

/// Creates a new user with an empty token list.
///
/// The payload shape (email format, password length) is validated at the
/// boundary before this is called; the duplicate-email check here is atomic
/// with the insert.
pub async fn signup(store: &Store, email: &str, password: &str) -> Result<User, AppError> {
    let password_hash = hash_password(password)?;
    let user = User::new(email.to_string(), password_hash);
    if !store.create_user(user.clone()).await {
        return Err(AppError::Validation("email already registered".into()));
    }
    Ok(user)
}

/// Looks up a user by email and checks the supplied password against the
/// stored hash. Unknown email and password mismatch are indistinguishable to
/// the caller.
pub async fn verify_credentials(
    store: &Store,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = store
        .user_by_email(email)
        .await
        .ok_or_else(|| AppError::Authentication("invalid credentials".into()))?;

    if verify_password(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(AppError::Authentication("invalid credentials".into()))
    }
}
