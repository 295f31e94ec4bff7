use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::info;

use crate::application::generation_service::GenerationService;
use crate::domain::error::DomainError;
use crate::domain::validation::{FieldError, Violation};
use crate::presentation::dto::{
    GenerateFromFridgeRequest, GenerateRecipeRequest, GeneratedRecipeResponse,
};
use crate::presentation::utils::request_id;

fn invalid(field: &'static str, violation: Violation) -> DomainError {
    DomainError::Validation(FieldError { field, violation })
}

/// Splits the comma-separated `ingredients` form into a clean list.
fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `fridge_ingredients` must be a JSON array of non-empty strings.
fn fridge_list(value: Option<&Value>) -> Result<Vec<String>, DomainError> {
    let field = "fridge_ingredients";
    let array = match value {
        None | Some(Value::Null) => return Err(invalid(field, Violation::NullValue)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid(field, Violation::WrongType)),
    };
    let mut names = Vec::with_capacity(array.len());
    for item in array {
        match item {
            Value::String(s) if !s.trim().is_empty() => names.push(s.trim().to_string()),
            _ => return Err(invalid(field, Violation::WrongType)),
        }
    }
    if names.is_empty() {
        return Err(invalid(field, Violation::TooShort));
    }
    Ok(names)
}

async fn run_generation(
    req: &HttpRequest,
    service: &GenerationService,
    ingredients: Vec<String>,
    dietary_concerns: Option<String>,
) -> Result<HttpResponse, DomainError> {
    let recipe = service
        .generate(&ingredients, dietary_concerns.as_deref())
        .await?;

    info!(
        request_id = %request_id(req),
        ingredient_count = ingredients.len(),
        "recipe generated"
    );

    Ok(HttpResponse::Ok().json(GeneratedRecipeResponse {
        success: true,
        recipe,
        dietary_concerns,
    }))
}

#[post("/api/generate-recipe")]
pub async fn generate_recipe(
    req: HttpRequest,
    service: web::Data<GenerationService>,
    payload: web::Json<GenerateRecipeRequest>,
) -> Result<HttpResponse, DomainError> {
    let raw = payload
        .ingredients
        .as_deref()
        .ok_or_else(|| invalid("ingredients", Violation::NullValue))?;
    let ingredients = split_ingredients(raw);
    if ingredients.is_empty() {
        return Err(invalid("ingredients", Violation::TooShort));
    }

    run_generation(&req, &service, ingredients, payload.dietary_concerns.clone()).await
}

#[post("/api/generate-recipe-from-fridge")]
pub async fn generate_recipe_from_fridge(
    req: HttpRequest,
    service: web::Data<GenerationService>,
    payload: web::Json<GenerateFromFridgeRequest>,
) -> Result<HttpResponse, DomainError> {
    let ingredients = fridge_list(payload.fridge_ingredients.as_ref())?;
    run_generation(&req, &service, ingredients, payload.dietary_concerns.clone()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_and_trims_comma_separated_ingredients() {
        assert_eq!(
            split_ingredients("pasta, tomatoes ,, basil"),
            vec!["pasta", "tomatoes", "basil"]
        );
        assert!(split_ingredients(" , ,").is_empty());
    }

    #[test]
    fn fridge_list_rejects_missing_and_wrong_types() {
        assert!(matches!(
            fridge_list(None),
            Err(DomainError::Validation(FieldError {
                violation: Violation::NullValue,
                ..
            }))
        ));
        assert!(matches!(
            fridge_list(Some(&json!("tomatoes"))),
            Err(DomainError::Validation(FieldError {
                violation: Violation::WrongType,
                ..
            }))
        ));
        assert!(matches!(
            fridge_list(Some(&json!(["tomatoes", 3]))),
            Err(DomainError::Validation(FieldError {
                violation: Violation::WrongType,
                ..
            }))
        ));
        assert!(matches!(
            fridge_list(Some(&json!([]))),
            Err(DomainError::Validation(FieldError {
                violation: Violation::TooShort,
                ..
            }))
        ));
        assert_eq!(
            fridge_list(Some(&json!([" tomatoes ", "onions"]))).unwrap(),
            vec!["tomatoes", "onions"]
        );
    }
}
