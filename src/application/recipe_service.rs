use std::sync::Arc;

use tracing::instrument;

use crate::data::recipe_repository::RecipeRepository;
use crate::domain::error::DomainError;
use crate::domain::recipe::{IngredientLine, NewRecipe, Recipe, RecipeIngredient};
use crate::presentation::dto::CreateRecipeRequest;

#[derive(Clone)]
pub struct RecipeService {
    repo: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(repo: Arc<dyn RecipeRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, payload))]
    pub async fn add_recipe(
        &self,
        user_id: i64,
        payload: &CreateRecipeRequest,
    ) -> Result<Recipe, DomainError> {
        let recipe = NewRecipe::from_json(
            user_id,
            payload.name.as_ref(),
            payload.cooktime.as_ref(),
            payload.instructions.as_ref(),
        )?;
        let lines = payload
            .ingredients
            .iter()
            .map(|line| IngredientLine::from_json(line.ingredient_id, line.quantity.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.repo.create(recipe, lines).await
    }

    pub async fn list_recipes(&self, user_id: i64) -> Result<Vec<Recipe>, DomainError> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn get_recipe(
        &self,
        id: i64,
    ) -> Result<(Recipe, Vec<RecipeIngredient>), DomainError> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::RecipeNotFound(id))?;
        let lines = self.repo.ingredients_for(id).await?;
        Ok((recipe, lines))
    }

    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: i64) -> Result<(), DomainError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::RecipeNotFound(id))
        }
    }
}
