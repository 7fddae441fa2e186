use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single issued session token as stored on the user record.
///
/// Every entry was produced by token issuance; entries are removed only by
/// explicit revocation. Membership in this list is the revocation check a
/// token must pass in addition to its signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionToken {
    pub access: String,
    pub token: String,
}

/// User record as held in the store. The plaintext password never appears
/// here; only the bcrypt derivation is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub tokens: Vec<SessionToken>,
}

impl User {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            tokens: Vec::new(),
        }
    }
}

/// The externally visible projection of a user: id and email only.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
