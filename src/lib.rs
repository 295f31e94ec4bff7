pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use application::account_service::AccountService;
use application::generation_service::GenerationService;
use application::pantry_service::PantryService;
use application::recipe_service::RecipeService;
use presentation::handlers;

/// Everything a worker needs; cloned into each actix app instance.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: AccountService,
    pub pantry: PantryService,
    pub recipes: RecipeService,
    pub generation: GenerationService,
}

/// Registers state and the full route table. Shared between the binary and
/// the end-to-end test suite so both run the same app.
pub fn configure(services: AppServices) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(services.accounts))
            .app_data(web::Data::new(services.pantry))
            .app_data(web::Data::new(services.recipes))
            .app_data(web::Data::new(services.generation))
            .route("/health", web::get().to(health))
            .service(handlers::account::create_user)
            .service(handlers::account::get_profile)
            .service(handlers::account::update_user)
            .service(handlers::account::delete_user)
            .service(handlers::auth::login)
            .service(handlers::auth::logout)
            .service(handlers::pantry::add_ingredient)
            .service(handlers::pantry::list_ingredients)
            .service(handlers::pantry::delete_ingredient)
            .service(handlers::recipe::add_recipe)
            .service(handlers::recipe::list_recipes)
            .service(handlers::recipe::get_recipe)
            .service(handlers::recipe::delete_recipe)
            .service(handlers::generate::generate_recipe)
            .service(handlers::generate::generate_recipe_from_fridge);
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
