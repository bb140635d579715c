//! HTTP handlers and route configuration.

mod admin;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
///
/// Submission and engagement throttling run inside their handlers with
/// dedicated limiter instances; the API-wide limiter wraps the whole app
/// in `main`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/admin")
                    .route("/verify", web::post().to(admin::verify))
                    .route("/posts", web::get().to(admin::list_all))
                    .route("/analytics", web::get().to(admin::analytics))
                    .route("/posts/{id}/flag", web::patch().to(admin::set_flag))
                    .route("/posts/{id}/status", web::patch().to(admin::set_status))
                    .route("/posts/{id}", web::delete().to(admin::delete)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::submit))
                    .route("", web::get().to(posts::list))
                    .route("/{slug}", web::get().to(posts::get_by_slug))
                    .route(
                        "/{slug}/recommendations",
                        web::get().to(posts::recommendations),
                    )
                    .route("/{id}/react", web::post().to(posts::react))
                    .route("/{id}/vote", web::post().to(posts::vote)),
            ),
    );
}
