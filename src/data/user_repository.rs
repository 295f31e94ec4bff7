use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, User};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, DomainError>;
    /// Removes the user; ingredients, recipes, and their join rows go with it
    /// via the cascade constraints. Returns false when no row matched.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, user_email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, user_name, user_email, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create user: {}", e);
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .map(|c| c.contains("users_email"))
                == Some(true)
            {
                DomainError::DuplicateEmail
            } else {
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(user_id = %created.id, email = %created.user_email, "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, user_email, password_hash, created_at
            FROM users
            WHERE user_email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by email: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, user_email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET user_name = COALESCE($1, user_name),
                password_hash = COALESCE($2, password_hash)
            WHERE id = $3
            RETURNING id, user_name, user_email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update user {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        if user.is_some() {
            info!(user_id = %id, "user updated");
        }
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete user {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        if deleted.rows_affected() > 0 {
            info!(user_id = %id, "user deleted");
        }
        Ok(deleted.rows_affected() > 0)
    }
}
