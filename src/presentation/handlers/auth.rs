use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::application::account_service::AccountService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{LoginRequest, MessageResponse, UserSummaryResponse};
use crate::presentation::utils::{request_id, SESSION_COOKIE};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    service: web::Data<AccountService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let (user, token) = service.login(&payload.email, &payload.password).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user logged in"
    );

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(UserSummaryResponse {
            id: user.id,
            name: user.user_name,
        }))
}

#[post("/logout")]
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, DomainError> {
    if req.cookie(SESSION_COOKIE).is_none() {
        return Err(DomainError::NoActiveSession);
    }

    info!(request_id = %request_id(&req), "user logged out");

    let mut removal = session_cookie(String::new());
    removal.set_max_age(CookieDuration::ZERO);

    Ok(HttpResponse::Ok().cookie(removal).json(MessageResponse {
        message: "Logged out successfully",
    }))
}
