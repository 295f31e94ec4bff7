use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::validation::FieldError;

/// Terminal outcome of the recipe generation retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("recipe generation service unavailable")]
    ServiceUnavailable,
    #[error("failed to generate a valid recipe after retries")]
    InvalidFormat,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(#[from] FieldError),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("ingredient already exists: {0}")]
    DuplicateIngredient(String),
    #[error("recipe already exists: {0}")]
    DuplicateRecipe(String),
    #[error("user not found: {0}")]
    UserNotFound(i64),
    #[error("ingredient not found: {0}")]
    IngredientNotFound(i64),
    #[error("recipe not found: {0}")]
    RecipeNotFound(i64),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no valid session")]
    Unauthorized,
    #[error("current password is incorrect")]
    WrongPassword,
    #[error("no active session")]
    NoActiveSession,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_)
            | DomainError::DuplicateEmail
            | DomainError::DuplicateIngredient(_)
            | DomainError::DuplicateRecipe(_)
            | DomainError::NoActiveSession => StatusCode::BAD_REQUEST,
            DomainError::UserNotFound(_)
            | DomainError::IngredientNotFound(_)
            | DomainError::RecipeNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::InvalidCredentials | DomainError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::WrongPassword => StatusCode::FORBIDDEN,
            DomainError::Generation(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail stays in the logs; the wire gets a fixed message.
        if let DomainError::Internal(_) = self {
            return HttpResponse::build(self.status_code()).json(ErrorBody {
                error: "internal server error",
                details: None,
            });
        }
        if let DomainError::Generation(err) = self {
            return HttpResponse::build(self.status_code()).json(json!({
                "success": false,
                "error": err.to_string(),
            }));
        }

        let message = self.to_string();
        let details = match self {
            DomainError::Validation(err) => Some(json!({ "field": err.field })),
            DomainError::UserNotFound(id)
            | DomainError::IngredientNotFound(id)
            | DomainError::RecipeNotFound(id) => Some(json!({ "resource": id })),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: message.as_str(),
            details,
        })
    }
}
