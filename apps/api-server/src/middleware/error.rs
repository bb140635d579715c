//! Error handling - every failure renders an RFC 7807 body with a kind.

use std::fmt;
use std::time::Duration;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use murmur_core::DomainError;
use murmur_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    ModerationDenied(String),
    RateLimited(Duration),
    Unauthorized,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ModerationDenied(msg) => write!(f, "Moderation denied: {}", msg),
            AppError::RateLimited(retry_after) => {
                write!(f, "Rate limited, retry after {}s", retry_after.as_secs())
            }
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ModerationDenied(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                // hidden and missing posts produce the same response
                HttpResponse::NotFound().json(ErrorResponse::not_found("post not found"))
            }
            AppError::BadRequest(detail) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail.as_str()))
            }
            AppError::ModerationDenied(detail) => {
                HttpResponse::Forbidden().json(ErrorResponse::moderation_denied(detail.as_str()))
            }
            AppError::RateLimited(retry_after) => HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", retry_after.as_secs().to_string()))
                .json(ErrorResponse::too_many_requests(format!(
                    "Rate limit exceeded. Try again in {} seconds.",
                    retry_after.as_secs()
                ))),
            AppError::Unauthorized => {
                HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
            }
            AppError::Conflict(detail) => {
                HttpResponse::Conflict().json(ErrorResponse::conflict(detail.as_str()))
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::ModerationDenied { field } => {
                AppError::ModerationDenied(format!("{field} was denied by moderation"))
            }
            DomainError::RateLimited { retry_after } => AppError::RateLimited(retry_after),
            DomainError::NotFound => AppError::NotFound,
            DomainError::SlugConflict(slug) => {
                AppError::Conflict(format!("slug {slug} is already taken"))
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
