//! Public post handlers.

use std::str::FromStr;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use murmur_core::domain::{PollChoice, PollCounts, Post, ReactionCounts, ReactionKind};
use murmur_core::service::{DEFAULT_PAGE_SIZE, DEFAULT_RECOMMENDATION_LIMIT, NewPost};
use murmur_shared::dto::{
    PollTally, PostResponse, ReactRequest, ReactionTally, SubmitPostRequest, VoteRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Map a domain post onto the wire shape, projecting the review state
/// back to the legacy status/flagged pair.
pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        tags: post.tags,
        slug: post.slug,
        author_id: post.author_id,
        status: post.review.status_label().to_string(),
        flagged: post.review.is_flagged(),
        reactions: reaction_tally(post.reactions),
        poll: poll_tally(post.poll),
        created_at: post.created_at,
    }
}

fn reaction_tally(counts: ReactionCounts) -> ReactionTally {
    ReactionTally {
        related: counts.related,
        thoughtful: counts.thoughtful,
        touched: counts.touched,
        inspired: counts.inspired,
    }
}

fn poll_tally(counts: PollCounts) -> PollTally {
    PollTally {
        yes: counts.yes,
        no: counts.no,
    }
}

/// Client identifier for rate limiting: the caller's network address.
fn client_key(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// POST /api/posts
pub async fn submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<SubmitPostRequest>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    let post = state
        .submissions
        .submit(
            &client_key(&req),
            NewPost {
                title: draft.title,
                content: draft.content,
                tags: draft.tags,
            },
        )
        .await?;

    tracing::info!(slug = %post.slug, "post submitted");
    Ok(HttpResponse::Created().json(post_response(post)))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let posts = state.feed.page(page, limit).await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_response).collect::<Vec<_>>()))
}

/// GET /api/posts/{slug}
pub async fn get_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.feed.by_slug(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// Engagement actions carry their own limiter instance, separate from
/// the API-wide one.
async fn check_engagement_limit(state: &AppState, req: &HttpRequest) -> AppResult<()> {
    let verdict = state
        .engagement_limiter
        .check(&client_key(req))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verdict.allowed {
        return Err(AppError::RateLimited(verdict.reset_after));
    }
    Ok(())
}

/// POST /api/posts/{id}/react
pub async fn react(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ReactRequest>,
) -> AppResult<HttpResponse> {
    check_engagement_limit(&state, &req).await?;

    let kind = ReactionKind::from_str(&body.kind)?;
    let counts = state.engagement.react(path.into_inner(), kind).await?;

    Ok(HttpResponse::Ok().json(reaction_tally(counts)))
}

/// POST /api/posts/{id}/vote
pub async fn vote(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<VoteRequest>,
) -> AppResult<HttpResponse> {
    check_engagement_limit(&state, &req).await?;

    let choice = PollChoice::from_str(&body.choice)?;
    let counts = state.engagement.vote(path.into_inner(), choice).await?;

    Ok(HttpResponse::Ok().json(poll_tally(counts)))
}

/// GET /api/posts/{slug}/recommendations
pub async fn recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state
        .recommendations
        .related(&path.into_inner(), DEFAULT_RECOMMENDATION_LIMIT)
        .await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(post_response).collect::<Vec<_>>()))
}
