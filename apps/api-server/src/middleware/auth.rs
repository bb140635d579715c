//! Admin authentication extractor.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use murmur_core::ports::{AdminCredential, AuthError};
use murmur_shared::ErrorResponse;

/// Header carrying the shared admin secret.
pub static ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Proof that the request carried the admin credential.
///
/// Use this in handlers to require admin access:
/// ```ignore
/// async fn protected(_admin: AdminAccess) -> impl Responder { ... }
/// ```
/// There is one process-wide secret - no per-admin identity and no audit
/// trail.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

/// Error type for failed admin authentication.
#[derive(Debug)]
pub struct AdminAuthError(pub AuthError);

impl std::fmt::Display for AdminAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AdminAuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
    }
}

impl FromRequest for AdminAccess {
    type Error = AdminAuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credential = match req.app_data::<web::Data<AdminCredential>>() {
            Some(credential) => credential,
            None => {
                tracing::error!("AdminCredential not found in app data");
                return ready(Err(AdminAuthError(AuthError::InvalidToken)));
            }
        };

        let presented = req
            .headers()
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        match presented {
            None => ready(Err(AdminAuthError(AuthError::MissingToken))),
            Some(token) if credential.matches(token) => ready(Ok(AdminAccess)),
            Some(_) => ready(Err(AdminAuthError(AuthError::InvalidToken))),
        }
    }
}
