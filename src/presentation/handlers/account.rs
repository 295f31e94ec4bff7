use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::application::account_service::AccountService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserCreatedResponse,
    UserProfileResponse, UserSummaryResponse,
};
use crate::presentation::utils::{request_id, AuthenticatedUser};

#[post("/users")]
pub async fn create_user(
    req: HttpRequest,
    service: web::Data<AccountService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user = service.register(&payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user registered"
    );

    Ok(HttpResponse::Created().json(UserCreatedResponse::from(&user)))
}

#[get("/users")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(UserProfileResponse {
        name: user.name,
        email: user.email,
    }))
}

#[put("/users")]
pub async fn update_user(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AccountService>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let updated = service.update_profile(user.id, &payload).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %updated.id,
        "user profile updated"
    );

    Ok(HttpResponse::Ok().json(UserSummaryResponse {
        id: updated.id,
        name: updated.user_name,
    }))
}

#[delete("/users")]
pub async fn delete_user(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<AccountService>,
) -> Result<HttpResponse, DomainError> {
    service.delete_account(user.id).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user account deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully",
    }))
}
