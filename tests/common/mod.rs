//! In-memory repository and completion-client doubles backing the
//! end-to-end suite, plus the wiring to assemble the app from them.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use pantry_chef_server::application::account_service::AccountService;
use pantry_chef_server::application::generation_service::GenerationService;
use pantry_chef_server::application::pantry_service::PantryService;
use pantry_chef_server::application::recipe_service::RecipeService;
use pantry_chef_server::data::ingredient_repository::IngredientRepository;
use pantry_chef_server::data::recipe_repository::RecipeRepository;
use pantry_chef_server::data::user_repository::UserRepository;
use pantry_chef_server::domain::error::DomainError;
use pantry_chef_server::domain::ingredient::{Ingredient, NewIngredient};
use pantry_chef_server::domain::recipe::{IngredientLine, NewRecipe, Recipe, RecipeIngredient};
use pantry_chef_server::domain::user::{NewUser, User};
use pantry_chef_server::infrastructure::openai::{CompletionApi, CompletionError};
use pantry_chef_server::infrastructure::security::SessionKeys;
use pantry_chef_server::AppServices;

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    pub recipe_ingredients: Vec<RecipeIngredient>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type SharedStore = Arc<Mutex<Store>>;

pub struct InMemoryUserRepository(SharedStore);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut store = self.0.lock().unwrap();
        if store.users.iter().any(|u| u.user_email == user.email) {
            return Err(DomainError::DuplicateEmail);
        }
        let id = store.next_id();
        let created = User {
            id,
            user_name: user.name,
            user_email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        store.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store.users.iter().find(|u| u.user_email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, DomainError> {
        let mut store = self.0.lock().unwrap();
        let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            user.user_name = name;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut store = self.0.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        if store.users.len() == before {
            return Ok(false);
        }
        // Cascade, the way the schema's ON DELETE CASCADE would.
        let gone_ingredients: Vec<i64> = store
            .ingredients
            .iter()
            .filter(|i| i.user_id == id)
            .map(|i| i.id)
            .collect();
        let gone_recipes: Vec<i64> = store
            .recipes
            .iter()
            .filter(|r| r.user_id == id)
            .map(|r| r.id)
            .collect();
        store.ingredients.retain(|i| i.user_id != id);
        store.recipes.retain(|r| r.user_id != id);
        store.recipe_ingredients.retain(|link| {
            !gone_recipes.contains(&link.recipe_id)
                && !gone_ingredients.contains(&link.ingredient_id)
        });
        Ok(true)
    }
}

pub struct InMemoryIngredientRepository(SharedStore);

#[async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn create(&self, ingredient: NewIngredient) -> Result<Ingredient, DomainError> {
        let mut store = self.0.lock().unwrap();
        if store
            .ingredients
            .iter()
            .any(|i| i.user_id == ingredient.user_id && i.ingredient_name == ingredient.name)
        {
            return Err(DomainError::DuplicateIngredient(ingredient.name));
        }
        let id = store.next_id();
        let created = Ingredient {
            id,
            user_id: ingredient.user_id,
            ingredient_name: ingredient.name,
            created_at: Utc::now(),
        };
        store.ingredients.push(created.clone());
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Ingredient>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .ingredients
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut store = self.0.lock().unwrap();
        let before = store.ingredients.len();
        store.ingredients.retain(|i| i.id != id);
        if store.ingredients.len() == before {
            return Ok(false);
        }
        store.recipe_ingredients.retain(|link| link.ingredient_id != id);
        Ok(true)
    }
}

pub struct InMemoryRecipeRepository(SharedStore);

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn create(
        &self,
        recipe: NewRecipe,
        lines: Vec<IngredientLine>,
    ) -> Result<Recipe, DomainError> {
        let mut store = self.0.lock().unwrap();
        if store
            .recipes
            .iter()
            .any(|r| r.user_id == recipe.user_id && r.recipe_name == recipe.name)
        {
            return Err(DomainError::DuplicateRecipe(recipe.name));
        }
        for line in &lines {
            if !store.ingredients.iter().any(|i| i.id == line.ingredient_id) {
                return Err(DomainError::IngredientNotFound(line.ingredient_id));
            }
        }
        let id = store.next_id();
        let created = Recipe {
            id,
            user_id: recipe.user_id,
            recipe_name: recipe.name,
            cooktime: recipe.cooktime,
            instructions: recipe.instructions,
            created_at: Utc::now(),
        };
        store.recipes.push(created.clone());
        for line in lines {
            let link_id = store.next_id();
            store.recipe_ingredients.push(RecipeIngredient {
                id: link_id,
                recipe_id: id,
                ingredient_id: line.ingredient_id,
                quantity: line.quantity,
            });
        }
        Ok(created)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Recipe>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .recipes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn ingredients_for(&self, recipe_id: i64) -> Result<Vec<RecipeIngredient>, DomainError> {
        let store = self.0.lock().unwrap();
        Ok(store
            .recipe_ingredients
            .iter()
            .filter(|link| link.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut store = self.0.lock().unwrap();
        let before = store.recipes.len();
        store.recipes.retain(|r| r.id != id);
        if store.recipes.len() == before {
            return Ok(false);
        }
        store.recipe_ingredients.retain(|link| link.recipe_id != id);
        Ok(true)
    }
}

/// Hands out pre-scripted completion responses and counts calls.
pub struct QueueClient {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: AtomicU32,
}

impl QueueClient {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionApi for QueueClient {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::RequestFailed("exhausted".into())))
    }
}

pub struct TestHarness {
    pub store: SharedStore,
    pub completions: Arc<QueueClient>,
    pub services: AppServices,
}

pub fn harness(completions: Vec<Result<String, CompletionError>>) -> TestHarness {
    let store: SharedStore = Arc::new(Mutex::new(Store::default()));
    let completions = Arc::new(QueueClient::new(completions));

    let services = AppServices {
        accounts: AccountService::new(
            Arc::new(InMemoryUserRepository(Arc::clone(&store))),
            SessionKeys::new("test-session-secret".into()),
        ),
        pantry: PantryService::new(Arc::new(InMemoryIngredientRepository(Arc::clone(&store)))),
        recipes: RecipeService::new(Arc::new(InMemoryRecipeRepository(Arc::clone(&store)))),
        generation: GenerationService::new(
            Arc::clone(&completions) as Arc<dyn CompletionApi>
        )
        .with_retry_policy(3, Duration::from_millis(1)),
    };

    TestHarness {
        store,
        completions,
        services,
    }
}
