//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes - gated by the AdminSession extractor
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::put().to(posts::save))
                    .route("/{id}", web::delete().to(posts::delete)),
            ),
    );
}
