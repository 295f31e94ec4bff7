use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer};

use pantry_chef_server::application::account_service::AccountService;
use pantry_chef_server::application::generation_service::GenerationService;
use pantry_chef_server::application::pantry_service::PantryService;
use pantry_chef_server::application::recipe_service::RecipeService;
use pantry_chef_server::data::ingredient_repository::PostgresIngredientRepository;
use pantry_chef_server::data::recipe_repository::PostgresRecipeRepository;
use pantry_chef_server::data::user_repository::PostgresUserRepository;
use pantry_chef_server::infrastructure::config::AppConfig;
use pantry_chef_server::infrastructure::database::{create_pool, run_migrations};
use pantry_chef_server::infrastructure::logging::init_logging;
use pantry_chef_server::infrastructure::openai::OpenAiClient;
use pantry_chef_server::infrastructure::security::SessionKeys;
use pantry_chef_server::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use pantry_chef_server::{configure, AppServices};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let ingredient_repo = Arc::new(PostgresIngredientRepository::new(pool.clone()));
    let recipe_repo = Arc::new(PostgresRecipeRepository::new(pool.clone()));

    let services = AppServices {
        accounts: AccountService::new(
            user_repo,
            SessionKeys::new(config.session_secret.clone()),
        ),
        pantry: PantryService::new(ingredient_repo),
        recipes: RecipeService::new(recipe_repo),
        generation: GenerationService::new(Arc::new(OpenAiClient::new(
            config.openai_api_key.clone(),
        )))
        .with_retry_policy(config.generation_retries, config.generation_delay),
    };

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(TimingMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(configure(services.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
