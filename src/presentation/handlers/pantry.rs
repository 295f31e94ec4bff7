use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::application::pantry_service::PantryService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CreateIngredientRequest, IngredientResponse, MessageResponse};
use crate::presentation::utils::{request_id, AuthenticatedUser};

#[post("/ingredients")]
pub async fn add_ingredient(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<PantryService>,
    payload: web::Json<CreateIngredientRequest>,
) -> Result<HttpResponse, DomainError> {
    let ingredient = service.add_ingredient(user.id, &payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        ingredient_id = %ingredient.id,
        "ingredient added"
    );

    Ok(HttpResponse::Created().json(IngredientResponse::from(&ingredient)))
}

#[get("/ingredients")]
pub async fn list_ingredients(
    user: AuthenticatedUser,
    service: web::Data<PantryService>,
) -> Result<HttpResponse, DomainError> {
    let ingredients = service.list_ingredients(user.id).await?;
    let response: Vec<IngredientResponse> =
        ingredients.iter().map(IngredientResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/ingredients/{id}")]
pub async fn delete_ingredient(
    req: HttpRequest,
    service: web::Data<PantryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete_ingredient(id).await?;

    info!(
        request_id = %request_id(&req),
        ingredient_id = %id,
        "ingredient deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Ingredient deleted successfully",
    }))
}
