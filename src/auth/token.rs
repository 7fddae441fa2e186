//!
//! # Token Issuer/Validator
//!
//! Signed session tokens, layered on the credential store. A token is valid
//! only while it passes a dual check: the HS256 signature must verify against
//! the process secret, and an equal entry must still be present in the owning
//! user's token list. Revocation removes the entry; the signature alone is
//! never sufficient. Tokens carry no expiry — once issued, a token lives
//! until it is explicitly revoked.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{SessionToken, User};
use crate::store::Store;

/// The only access scope issued by this subsystem.
pub const ACCESS_AUTH: &str = "auth";

/// Claims encoded in a session token. No `exp` claim exists; validity is
/// bounded by revocation, not time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: Uuid,
    /// Access scope; always `"auth"`.
    pub access: String,
    /// Issued-at, seconds since epoch. Not checked on validation; it keeps
    /// tokens minted at different times distinct on the wire.
    pub iat: i64,
}

fn sign_claims(secret: &str, claims: &Claims) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

fn decode_claims(secret: &str, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // These tokens never expire; don't require or check an `exp` claim.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    // Decode failures convert straight to Unauthorized; see error.rs.
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Signs a new token for `user_id` and appends it to the user's token list.
///
/// Each call appends independently: concurrent logins are all valid at once,
/// and issuing a new token never invalidates earlier ones.
pub async fn issue_token(store: &Store, config: &Config, user_id: Uuid) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id,
        access: ACCESS_AUTH.to_string(),
        iat: chrono::Utc::now().timestamp(),
    };
    let token = sign_claims(&config.jwt_secret, &claims)?;

    let entry = SessionToken {
        access: ACCESS_AUTH.to_string(),
        token: token.clone(),
    };
    if !store.append_token(user_id, entry).await {
        return Err(AppError::Internal("user not found for token issuance".into()));
    }
    Ok(token)
}

/// Verifies the signature, then requires the token to still be present in the
/// owning user's list. Returns the user and the access scope.
///
/// Both failure modes surface as `Unauthorized`: this only runs in session
/// context, where a bad token is a 401. The membership check also covers
/// tokens signed for a user that no longer holds them (revoked) and tokens
/// forged against another user's list.
pub async fn validate_token(
    store: &Store,
    config: &Config,
    token: &str,
) -> Result<(User, String), AppError> {
    let claims = decode_claims(&config.jwt_secret, token)?;

    let user = store
        .user_by_id(claims.sub)
        .await
        .ok_or_else(|| AppError::Unauthorized("unknown user".into()))?;

    let held = user
        .tokens
        .iter()
        .any(|entry| entry.access == claims.access && entry.token == token);
    if !held {
        return Err(AppError::Unauthorized("token revoked".into()));
    }
    Ok((user, claims.access))
}

/// Removes the matching entry from the user's token list. Idempotent: an
/// absent entry is success, not an error.
pub async fn revoke_token(store: &Store, user_id: Uuid, token: &str) -> Result<(), AppError> {
    store.remove_token(user_id, token).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::signup;

    fn test_config(secret: &str) -> Config {
        Config {
            jwt_secret: secret.to_string(),
            server_port: 3000,
            server_host: "127.0.0.1".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_issue_then_validate() {
        let store = Store::new();
        let config = test_config("test-secret");
        let user = signup(&store, "a@x.com", "secret1").await.unwrap();

        let token = issue_token(&store, &config, user.id).await.unwrap();
        let (validated, access) = validate_token(&store, &config, &token).await.unwrap();
        assert_eq!(validated.id, user.id);
        assert_eq!(access, ACCESS_AUTH);
    }

    #[actix_rt::test]
    async fn test_validate_fails_after_revoke_and_revoke_is_idempotent() {
        let store = Store::new();
        let config = test_config("test-secret");
        let user = signup(&store, "a@x.com", "secret1").await.unwrap();
        let token = issue_token(&store, &config, user.id).await.unwrap();

        revoke_token(&store, user.id, &token).await.unwrap();
        match validate_token(&store, &config, &token).await {
            Err(AppError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }

        // Second revocation of the same token is a no-op.
        revoke_token(&store, user.id, &token).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_foreign_signature_rejected() {
        let store = Store::new();
        let config = test_config("test-secret");
        let user = signup(&store, "a@x.com", "secret1").await.unwrap();
        let token = issue_token(&store, &config, user.id).await.unwrap();

        let other = test_config("a-completely-different-secret");
        match validate_token(&store, &other, &token).await {
            Err(AppError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_well_signed_but_unissued_token_rejected() {
        let store = Store::new();
        let config = test_config("test-secret");
        let user = signup(&store, "a@x.com", "secret1").await.unwrap();

        // Correct signature, correct user, but never went through issuance,
        // so the revocation-list membership check fails.
        let claims = Claims {
            sub: user.id,
            access: ACCESS_AUTH.to_string(),
            iat: chrono::Utc::now().timestamp(),
        };
        let forged = sign_claims(&config.jwt_secret, &claims).unwrap();
        match validate_token(&store, &config, &forged).await {
            Err(AppError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_multiple_logins_all_valid() {
        let store = Store::new();
        let config = test_config("test-secret");
        let user = signup(&store, "a@x.com", "secret1").await.unwrap();

        let first = issue_token(&store, &config, user.id).await.unwrap();
        let second = issue_token(&store, &config, user.id).await.unwrap();
        assert!(validate_token(&store, &config, &first).await.is_ok());
        assert!(validate_token(&store, &config, &second).await.is_ok());

        // Each login appended its own entry; neither invalidated the other.
        let stored = store.user_by_id(user.id).await.unwrap();
        assert_eq!(stored.tokens.len(), 2);
    }
}
