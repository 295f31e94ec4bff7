use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{self, FieldError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub user_id: i64,
    pub ingredient_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub user_id: i64,
    pub name: String,
}

impl NewIngredient {
    pub fn from_json(user_id: i64, name: Option<&Value>) -> Result<Self, FieldError> {
        Ok(Self {
            user_id,
            name: validation::ingredient_name(name)?,
        })
    }
}
