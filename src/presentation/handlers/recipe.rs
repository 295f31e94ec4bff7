use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::application::recipe_service::RecipeService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    CreateRecipeRequest, MessageResponse, RecipeDetailResponse, RecipeCreatedResponse, RecipeResponse,
};
use crate::presentation::utils::{request_id, AuthenticatedUser};

#[post("/recipes")]
pub async fn add_recipe(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<RecipeService>,
    payload: web::Json<CreateRecipeRequest>,
) -> Result<HttpResponse, DomainError> {
    let recipe = service.add_recipe(user.id, &payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        recipe_id = %recipe.id,
        "recipe saved"
    );

    Ok(HttpResponse::Created().json(RecipeCreatedResponse {
        id: recipe.id,
        name: recipe.recipe_name,
    }))
}

#[get("/recipes")]
pub async fn list_recipes(
    user: AuthenticatedUser,
    service: web::Data<RecipeService>,
) -> Result<HttpResponse, DomainError> {
    let recipes = service.list_recipes(user.id).await?;
    let response: Vec<RecipeResponse> = recipes.iter().map(RecipeResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/recipes/{id}")]
pub async fn get_recipe(
    service: web::Data<RecipeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let (recipe, lines) = service.get_recipe(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(RecipeDetailResponse::new(&recipe, &lines)))
}

#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    req: HttpRequest,
    service: web::Data<RecipeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete_recipe(id).await?;

    info!(
        request_id = %request_id(&req),
        recipe_id = %id,
        "recipe deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Recipe deleted successfully",
    }))
}
