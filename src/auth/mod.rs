pub mod credentials;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthSession;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, revoke_token, validate_token, ACCESS_AUTH};

/// Request/response header carrying the session token.
pub const AUTH_HEADER: &str = "x-auth";

/// Payload for signup (`POST /users`).
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Must be a structurally valid email address.
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for login (`POST /users/login`).
///
/// Deliberately unvalidated beyond presence: a malformed email or short
/// password at login simply fails credential verification.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
