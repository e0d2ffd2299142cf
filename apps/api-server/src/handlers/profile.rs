//! `profile.*` procedures.

use actix_web::{HttpResponse, web};
use chirp_shared::ApiResponse;
use chirp_shared::dto::UsernameQuery;

use super::convert::author_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/trpc/profile.getUserByUsername?username=
pub async fn get_user_by_username(
    state: web::Data<AppState>,
    query: web::Query<UsernameQuery>,
) -> AppResult<HttpResponse> {
    let author = state.profiles.get_user_by_username(&query.username).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(author_response(author))))
}
