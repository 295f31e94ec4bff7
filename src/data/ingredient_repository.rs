use crate::domain::error::DomainError;
use crate::domain::ingredient::{Ingredient, NewIngredient};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait IngredientRepository: Send + Sync {
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, DomainError>;
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Ingredient>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresIngredientRepository {
    pool: PgPool,
}

impl PostgresIngredientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for PostgresIngredientRepository {
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, DomainError> {
        let created = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (user_id, ingredient_name)
            VALUES ($1, $2)
            RETURNING id, user_id, ingredient_name, created_at
            "#,
        )
        .bind(ingredient.user_id)
        .bind(&ingredient.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create ingredient: {}", e);
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .map(|c| c.contains("ingredients_user_name"))
                == Some(true)
            {
                DomainError::DuplicateIngredient(ingredient.name.clone())
            } else {
                DomainError::Internal(format!("database error: {}", e))
            }
        })?;

        info!(ingredient_id = %created.id, user_id = %created.user_id, "ingredient created");
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Ingredient>, DomainError> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, user_id, ingredient_name, created_at
            FROM ingredients
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list ingredients for user {}: {}", user_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete ingredient {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        if deleted.rows_affected() > 0 {
            info!(ingredient_id = %id, "ingredient deleted");
        }
        Ok(deleted.rows_affected() > 0)
    }
}
