use std::sync::Arc;

use tracing::instrument;

use crate::data::ingredient_repository::IngredientRepository;
use crate::domain::error::DomainError;
use crate::domain::ingredient::{Ingredient, NewIngredient};
use crate::presentation::dto::CreateIngredientRequest;

#[derive(Clone)]
pub struct PantryService {
    repo: Arc<dyn IngredientRepository>,
}

impl PantryService {
    pub fn new(repo: Arc<dyn IngredientRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, payload))]
    pub async fn add_ingredient(
        &self,
        user_id: i64,
        payload: &CreateIngredientRequest,
    ) -> Result<Ingredient, DomainError> {
        let ingredient = NewIngredient::from_json(user_id, payload.ingredient_name.as_ref())?;
        self.repo.create(ingredient).await
    }

    pub async fn list_ingredients(&self, user_id: i64) -> Result<Vec<Ingredient>, DomainError> {
        self.repo.list_for_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_ingredient(&self, id: i64) -> Result<(), DomainError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::IngredientNotFound(id))
        }
    }
}
