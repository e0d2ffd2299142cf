//! Server-rendered pages.
//!
//! Pages call the same services as the RPC surface and embed the results as
//! dehydrated query state for client hydration.

mod html;
mod pages;
mod time;

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use std::fmt;

use crate::middleware::error::AppError;

pub use html::{DehydratedState, escape_html};
pub use time::relative_time;

/// Configure page routes. Register after the API scope.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/", web::post().to(pages::create_from_form))
        .route("/post/{id}", web::get().to(pages::single_post))
        .route("/{slug}", web::get().to(pages::profile));
}

/// A failed page read. Renders the generic error page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<chirp_core::DomainError> for PageError {
    fn from(err: chirp_core::DomainError) -> Self {
        Self(AppError::from(err))
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match &self.0 {
            AppError::Internal(detail) => tracing::error!("Page failed: {}", detail),
            other => tracing::debug!(error = %other, "Page failed"),
        }

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(html::error_page())
    }
}

pub type PageResult = Result<HttpResponse, PageError>;
