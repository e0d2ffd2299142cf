//! HTTP handlers and route configuration.
//!
//! Procedures are mounted under `/api/trpc/<router>.<procedure>`: queries
//! take a query string, mutations a JSON body.

pub(crate) mod convert;
mod health;
mod post;
mod profile;

use actix_web::web;

/// Configure all RPC routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/trpc")
                    // Public procedures
                    .route("/post.getAll", web::get().to(post::get_all))
                    .route(
                        "/post.getPostByUserId",
                        web::get().to(post::get_post_by_user_id),
                    )
                    .route("/post.getById", web::get().to(post::get_by_id))
                    .route(
                        "/profile.getUserByUsername",
                        web::get().to(profile::get_user_by_username),
                    )
                    // Private procedures
                    .route("/post.create", web::post().to(post::create)),
            ),
    );
}
