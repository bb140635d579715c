//! Handler-level tests over the full app wiring.

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;

use murmur_infra::{ModerationConfig, RateLimitConfig};
use murmur_shared::dto::{PollTally, PostResponse, ReactionTally};

use crate::config::AppConfig;
use crate::handlers::configure_routes;
use crate::state::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        admin_token: "test-secret".into(),
        auto_approve: true,
        moderation: ModerationConfig {
            denied_terms: vec!["forbidden".into()],
        },
        submission_limit: RateLimitConfig::new(100, Duration::from_secs(3600)),
        engagement_limit: RateLimitConfig::new(1000, Duration::from_secs(3600)),
        api_limit: RateLimitConfig::new(10_000, Duration::from_secs(900)),
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($state.credential.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn submit_req(title: &str, content: &str, tags: &[&str]) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": title, "content": content, "tags": tags }))
}

#[actix_web::test]
async fn health_reports_ok() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn submit_then_read_roundtrip() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let resp = test::call_service(&app, submit_req("Hello", "World", &["hope"]).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: PostResponse = test::read_body_json(resp).await;
    assert!(post.slug.starts_with("hello-"));
    assert_eq!(post.slug.len(), "hello-".len() + 6);
    assert!(
        post.slug["hello-".len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
    assert_eq!(post.status, "approved");
    assert!(!post.flagged);
    let ReactionTally {
        related,
        thoughtful,
        touched,
        inspired,
    } = post.reactions;
    assert_eq!((related, thoughtful, touched, inspired), (0, 0, 0, 0));
    let PollTally { yes, no } = post.poll;
    assert_eq!((yes, no), (0, 0));

    let listed: Vec<PostResponse> = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await,
    )
    .await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slug, post.slug);

    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.slug))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
}

#[actix_web::test]
async fn submission_gates_reject_in_order() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let resp = test::call_service(&app, submit_req("", "World", &[]).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // banned content is denied the same way every time
    for _ in 0..2 {
        let resp =
            test::call_service(&app, submit_req("Hello", "very forbidden words", &[]).to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    // nothing made it into the public feed
    let listed: Vec<PostResponse> = test::read_body_json(
        test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await,
    )
    .await;
    assert!(listed.is_empty());
}

#[actix_web::test]
async fn submissions_throttle_at_the_boundary() {
    let mut config = test_config();
    config.submission_limit = RateLimitConfig::new(2, Duration::from_secs(3600));
    let state = AppState::new(&config);
    let app = test_app!(state);

    for i in 0..2 {
        let resp =
            test::call_service(&app, submit_req(&format!("Post {i}"), "body", &[]).to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, submit_req("Post 2", "body", &[]).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("Retry-After"));
}

#[actix_web::test]
async fn concurrent_reactions_both_land() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let post: PostResponse =
        test::read_body_json(test::call_service(&app, submit_req("Hello", "World", &["hope"]).to_request()).await)
            .await;

    let react = || {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/posts/{}/react", post.id))
                .set_json(json!({ "kind": "inspired" }))
                .to_request(),
        )
    };
    let (a, b) = tokio::join!(react(), react());
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let fetched: PostResponse = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/posts/{}", post.slug))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(fetched.reactions.inspired, 2);
}

#[actix_web::test]
async fn invalid_engagement_input_is_rejected() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let post: PostResponse =
        test::read_body_json(test::call_service(&app, submit_req("Hello", "World", &[]).to_request()).await)
            .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/react", post.id))
            .set_json(json!({ "kind": "applause" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/posts/{}/vote", uuid::Uuid::new_v4()))
            .set_json(json!({ "choice": "yes" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let vote: PollTally = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/posts/{}/vote", post.id))
                .set_json(json!({ "choice": "yes" }))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(vote.yes, 1);
    assert_eq!(vote.no, 0);
}

#[actix_web::test]
async fn flagging_hides_a_post_from_the_public_surface() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let post: PostResponse =
        test::read_body_json(test::call_service(&app, submit_req("Hello", "World", &[]).to_request()).await)
            .await;

    let flagged: PostResponse = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/admin/posts/{}/flag", post.id))
                .insert_header(("X-Admin-Token", "test-secret"))
                .set_json(json!({ "flagged": true }))
                .to_request(),
        )
        .await,
    )
    .await;
    assert!(flagged.flagged);
    assert_eq!(flagged.status, "rejected");

    // gone from public reads
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.slug))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // still on the admin surface
    let all: Vec<PostResponse> = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/posts")
                .insert_header(("X-Admin-Token", "test-secret"))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, "rejected");

    // unflagging restores approval and public visibility
    let restored: PostResponse = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/admin/posts/{}/flag", post.id))
                .insert_header(("X-Admin-Token", "test-secret"))
                .set_json(json!({ "flagged": false }))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(restored.status, "approved");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.slug))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn status_cannot_return_to_pending() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let post: PostResponse =
        test::read_body_json(test::call_service(&app, submit_req("Hello", "World", &[]).to_request()).await)
            .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/posts/{}/status", post.id))
            .insert_header(("X-Admin-Token", "test-secret"))
            .set_json(json!({ "status": "pending" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // rejection via status also raises the flag
    let rejected: PostResponse = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/admin/posts/{}/status", post.id))
                .insert_header(("X-Admin-Token", "test-secret"))
                .set_json(json!({ "status": "rejected" }))
                .to_request(),
        )
        .await,
    )
    .await;
    assert!(rejected.flagged);
}

#[actix_web::test]
async fn admin_surface_requires_the_secret() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/admin/posts").to_request())
            .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/analytics")
            .insert_header(("X-Admin-Token", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "password": "test-secret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn analytics_reflect_the_collection() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    for i in 0..3 {
        test::call_service(
            &app,
            submit_req(&format!("Post {i}"), "body", &["hope"]).to_request(),
        )
        .await;
    }

    let summary: serde_json::Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/admin/analytics")
                .insert_header(("X-Admin-Token", "test-secret"))
                .to_request(),
        )
        .await,
    )
    .await;

    assert_eq!(summary["totalPosts"], 3);
    assert_eq!(summary["flaggedPosts"], 0);
    assert_eq!(summary["postsThisMonth"], 3);
    assert_eq!(summary["topTags"][0]["tag"], "hope");
    assert_eq!(summary["topTags"][0]["count"], 3);
    assert_eq!(summary["dailyPosts"].as_array().unwrap().len(), 30);
}

#[actix_web::test]
async fn delete_is_permanent() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let post: PostResponse =
        test::read_body_json(test::call_service(&app, submit_req("Hello", "World", &[]).to_request()).await)
            .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/admin/posts/{}", post.id))
            .insert_header(("X-Admin-Token", "test-secret"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/admin/posts/{}", post.id))
            .insert_header(("X-Admin-Token", "test-secret"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.slug))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn recommendations_share_tags_and_exclude_the_source() {
    let state = AppState::new(&test_config());
    let app = test_app!(state);

    let source: PostResponse = test::read_body_json(
        test::call_service(&app, submit_req("Source", "body", &["hope", "loss"]).to_request())
            .await,
    )
    .await;
    let matching: PostResponse = test::read_body_json(
        test::call_service(&app, submit_req("Match", "body", &["hope"]).to_request()).await,
    )
    .await;
    test::call_service(&app, submit_req("Unrelated", "body", &["joy"]).to_request()).await;

    let related: Vec<PostResponse> = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/posts/{}/recommendations", source.slug))
                .to_request(),
        )
        .await,
    )
    .await;

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, matching.id);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/posts/no-such-slug/recommendations")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
