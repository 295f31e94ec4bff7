use crate::domain::error::DomainError;
use crate::domain::recipe::{IngredientLine, NewRecipe, Recipe, RecipeIngredient};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Inserts the recipe and its ingredient lines in one transaction.
    async fn create(
        &self,
        recipe: NewRecipe,
        lines: Vec<IngredientLine>,
    ) -> Result<Recipe, DomainError>;
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Recipe>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, DomainError>;
    async fn ingredients_for(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

#[derive(Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error, recipe_name: &str, lines: &[IngredientLine]) -> DomainError {
    error!("failed to create recipe: {}", e);
    let constraint = e
        .as_database_error()
        .and_then(|db| db.constraint())
        .unwrap_or_default()
        .to_string();
    if constraint.contains("recipes_user_name") {
        DomainError::DuplicateRecipe(recipe_name.to_string())
    } else if constraint.contains("recipe_ingredients_ingredient_id") {
        // FK violation: one of the referenced pantry ingredients is gone.
        let id = lines.first().map(|l| l.ingredient_id).unwrap_or_default();
        DomainError::IngredientNotFound(id)
    } else {
        DomainError::Internal(format!("database error: {}", e))
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn create(
        &self,
        recipe: NewRecipe,
        lines: Vec<IngredientLine>,
    ) -> Result<Recipe, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Internal(format!("database error: {}", e)))?;

        let created = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (user_id, recipe_name, cooktime, instructions)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, recipe_name, cooktime, instructions, created_at
            "#,
        )
        .bind(recipe.user_id)
        .bind(&recipe.name)
        .bind(recipe.cooktime)
        .bind(&recipe.instructions)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &recipe.name, &lines))?;

        for line in &lines {
            sqlx::query(
                r#"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(created.id)
            .bind(line.ingredient_id)
            .bind(&line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, &recipe.name, std::slice::from_ref(line)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::Internal(format!("database error: {}", e)))?;

        info!(recipe_id = %created.id, user_id = %created.user_id, "recipe created");
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Recipe>, DomainError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, recipe_name, cooktime, instructions, created_at
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list recipes for user {}: {}", user_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, DomainError> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, recipe_name, cooktime, instructions, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find recipe {}: {}", id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn ingredients_for(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, DomainError> {
        sqlx::query_as::<_, RecipeIngredient>(
            r#"
            SELECT id, recipe_id, ingredient_id, quantity
            FROM recipe_ingredients
            WHERE recipe_id = $1
            ORDER BY id
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list recipe ingredients for {}: {}", recipe_id, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete recipe {}: {}", id, e);
                DomainError::Internal(format!("database error: {}", e))
            })?;

        if deleted.rows_affected() > 0 {
            info!(recipe_id = %id, "recipe deleted");
        }
        Ok(deleted.rows_affected() > 0)
    }
}
