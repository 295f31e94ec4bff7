use actix_web::dev::Payload;
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::application::account_service::AccountService;
use crate::domain::error::DomainError;

/// Name of the HttpOnly cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated context established from the session cookie. Handlers that
/// declare this extractor are session-scoped; everything else stays public.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let cookie = req.cookie(SESSION_COOKIE);
        let service = req.app_data::<web::Data<AccountService>>().cloned();

        Box::pin(async move {
            let service = service.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("AccountService missing")
            })?;
            let cookie = cookie.ok_or(DomainError::Unauthorized)?;
            let claims = service
                .keys()
                .verify_token(cookie.value())
                .map_err(|_| DomainError::Unauthorized)?;
            let user_id = claims.user_id().ok_or(DomainError::Unauthorized)?;
            let user = service
                .get_user(user_id)
                .await
                .map_err(|_| DomainError::Unauthorized)?;

            Ok(AuthenticatedUser {
                id: user.id,
                name: user.user_name,
                email: user.user_email,
            })
        })
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<super::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
