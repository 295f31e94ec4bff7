use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, FieldError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub user_email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Validated signup data. The password is still plaintext here; the account
/// service hashes it before anything is persisted.
#[derive(Debug)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserDraft {
    pub fn from_json(
        name: Option<&Value>,
        email: Option<&Value>,
        password: Option<&Value>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            name: validation::user_name(name)?,
            email: validation::user_email(email)?.to_lowercase(),
            password: validation::user_password(password)?,
        })
    }
}

/// What actually reaches the repository: the plaintext is gone.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
