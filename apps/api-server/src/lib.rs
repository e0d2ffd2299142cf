//! # Chirp API Server
//!
//! RPC procedures under `/api/trpc` and the server-rendered pages, sharing
//! one [`AppState`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
pub mod views;

use actix_web::web;

use middleware::error::AppError;
use state::AppState;
use views::PageError;

/// Register state, extractor configs, RPC routes, and pages.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: AppState) {
    cfg.app_data(web::Data::new(state.sessions.clone()))
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(err.to_string()).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(err.to_string()).into()
        }))
        .app_data(web::FormConfig::default().error_handler(|err, _req| {
            PageError(AppError::BadRequest(err.to_string())).into()
        }))
        .configure(handlers::configure_routes)
        .configure(views::configure_pages);
}
