//! Admin handlers - authorized by the shared-secret extractor.

use std::str::FromStr;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use murmur_core::domain::ReviewState;
use murmur_shared::ApiResponse;
use murmur_shared::dto::{AdminSession, FlagRequest, StatusRequest, VerifyRequest};

use crate::handlers::posts::post_response;
use crate::middleware::auth::AdminAccess;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/admin/verify
///
/// Exchanges the shared secret for the session token clients replay in
/// the `X-Admin-Token` header.
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyRequest>,
) -> AppResult<HttpResponse> {
    if !state.credential.matches(&body.password) {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AdminSession {
        token: state.credential.session_token().to_string(),
    })))
}

/// GET /api/admin/posts
pub async fn list_all(state: web::Data<AppState>, _admin: AdminAccess) -> AppResult<HttpResponse> {
    let posts = state.gateway.list_all().await?;
    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_response).collect::<Vec<_>>()))
}

/// GET /api/admin/analytics
pub async fn analytics(state: web::Data<AppState>, _admin: AdminAccess) -> AppResult<HttpResponse> {
    let summary = state.analytics.summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// PATCH /api/admin/posts/{id}/flag
pub async fn set_flag(
    state: web::Data<AppState>,
    _admin: AdminAccess,
    path: web::Path<Uuid>,
    body: web::Json<FlagRequest>,
) -> AppResult<HttpResponse> {
    let post = state.gateway.set_flag(path.into_inner(), body.flagged).await?;
    tracing::info!(slug = %post.slug, flagged = body.flagged, "post flag updated");
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PATCH /api/admin/posts/{id}/status
pub async fn set_status(
    state: web::Data<AppState>,
    _admin: AdminAccess,
    path: web::Path<Uuid>,
    body: web::Json<StatusRequest>,
) -> AppResult<HttpResponse> {
    let status = ReviewState::from_str(&body.status)?;
    let post = state.gateway.set_status(path.into_inner(), status).await?;
    tracing::info!(slug = %post.slug, status = post.review.status_label(), "post status updated");
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _admin: AdminAccess,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.gateway.delete(id).await?;
    tracing::info!(%id, "post deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "post deleted")))
}
