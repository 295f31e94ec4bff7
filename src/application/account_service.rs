use std::sync::Arc;

use tracing::instrument;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User, UserDraft};
use crate::domain::validation;
use crate::infrastructure::security::{hash_password, verify_password, SessionKeys};
use crate::presentation::dto::{CreateUserRequest, UpdateUserRequest};

#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
    keys: SessionKeys,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: SessionKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self, payload))]
    pub async fn register(&self, payload: &CreateUserRequest) -> Result<User, DomainError> {
        let draft = UserDraft::from_json(
            payload.name.as_ref(),
            payload.email.as_ref(),
            payload.password.as_ref(),
        )?;
        // Plaintext ends here.
        let password_hash =
            hash_password(&draft.password).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.repo
            .create(NewUser {
                name: draft.name,
                email: draft.email,
                password_hash,
            })
            .await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let user = self
            .repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .keys
            .issue_token(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok((user, token))
    }

    #[instrument(skip(self, payload))]
    pub async fn update_profile(
        &self,
        user_id: i64,
        payload: &UpdateUserRequest,
    ) -> Result<User, DomainError> {
        let user = self.get_user(user_id).await?;

        let current = payload
            .current_password
            .as_deref()
            .ok_or(DomainError::WrongPassword)?;
        let valid = verify_password(current, &user.password_hash)
            .map_err(|_| DomainError::WrongPassword)?;
        if !valid {
            return Err(DomainError::WrongPassword);
        }

        let name = match payload.name.as_ref() {
            Some(value) => Some(validation::user_name(Some(value))?),
            None => None,
        };
        let password_hash = match payload.new_password.as_ref() {
            Some(value) => {
                let plaintext = validation::user_password(Some(value))?;
                Some(hash_password(&plaintext).map_err(|e| DomainError::Internal(e.to_string()))?)
            }
            None => None,
        };

        self.repo
            .update(user_id, name, password_hash)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: i64) -> Result<(), DomainError> {
        if self.repo.delete(user_id).await? {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(user_id))
        }
    }
}
