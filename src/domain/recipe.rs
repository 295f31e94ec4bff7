use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, FieldError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub recipe_name: String,
    pub cooktime: i32,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

/// Join row tying a pantry ingredient (with a quantity) to a saved recipe.
/// Created only alongside its recipe; there is no independent update path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: String,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub user_id: i64,
    pub name: String,
    pub cooktime: i32,
    pub instructions: String,
}

impl NewRecipe {
    pub fn from_json(
        user_id: i64,
        name: Option<&Value>,
        cooktime: Option<&Value>,
        instructions: Option<&Value>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            user_id,
            name: validation::recipe_name(name)?,
            cooktime: validation::recipe_cooktime(cooktime)?,
            instructions: validation::recipe_instructions(instructions)?,
        })
    }
}

/// One validated `{ingredient_id, quantity}` line from a recipe payload.
#[derive(Debug, Clone)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub quantity: String,
}

impl IngredientLine {
    pub fn from_json(ingredient_id: i64, quantity: Option<&Value>) -> Result<Self, FieldError> {
        Ok(Self {
            ingredient_id,
            quantity: validation::quantity(quantity)?,
        })
    }
}
