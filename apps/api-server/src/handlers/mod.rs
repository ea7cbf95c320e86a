//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod convert;
mod health;
mod landing;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/landing", web::get().to(landing::index))
            .route("/categories", web::get().to(categories::index))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes; "/create" must be registered before "/{id}"
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::store))
                    .route("/create", web::get().to(posts::create))
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::destroy))
                    .route("/{id}/edit", web::get().to(posts::edit))
                    .route("/{id}/comments", web::post().to(comments::store)),
            ),
    );
}
