use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::{Recipe, RecipeIngredient};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Creation payloads keep their fields as raw JSON values so the validation
// layer can tell "absent / null" apart from "present with the wrong type".

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub new_password: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    #[serde(default)]
    pub ingredient_name: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub cooktime: Option<Value>,
    #[serde(default)]
    pub instructions: Option<Value>,
    /// Optional pantry links; the only way RecipeIngredient rows come to exist.
    #[serde(default)]
    pub ingredients: Vec<RecipeLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeLineRequest {
    pub ingredient_id: i64,
    #[serde(default)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeRequest {
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub dietary_concerns: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFromFridgeRequest {
    #[serde(default)]
    pub fridge_ingredients: Option<Value>,
    #[serde(default)]
    pub dietary_concerns: Option<String>,
}

// ======================= Responses =======================

#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserCreatedResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.user_name.clone(),
            email: user.user_email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummaryResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RecipeCreatedResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.ingredient_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub name: String,
    pub cooktime: i32,
    pub instructions: String,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.recipe_name.clone(),
            cooktime: recipe.cooktime,
            instructions: recipe.instructions.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDetailResponse {
    pub id: i64,
    pub name: String,
    pub cooktime: i32,
    pub instructions: String,
    pub ingredients: Vec<RecipeLineResponse>,
}

#[derive(Debug, Serialize)]
pub struct RecipeLineResponse {
    pub ingredient_id: i64,
    pub quantity: String,
}

impl RecipeDetailResponse {
    pub fn new(recipe: &Recipe, lines: &[RecipeIngredient]) -> Self {
        Self {
            id: recipe.id,
            name: recipe.recipe_name.clone(),
            cooktime: recipe.cooktime,
            instructions: recipe.instructions.clone(),
            ingredients: lines
                .iter()
                .map(|line| RecipeLineResponse {
                    ingredient_id: line.ingredient_id,
                    quantity: line.quantity.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedRecipeResponse {
    pub success: bool,
    pub recipe: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_concerns: Option<String>,
}
