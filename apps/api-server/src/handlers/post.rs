//! `post.*` procedures.

use actix_web::{HttpResponse, web};
use chirp_shared::ApiResponse;
use chirp_shared::dto::{CreatePostRequest, PostByIdQuery, PostsByUserQuery};

use super::convert::{feed_item_response, feed_response, post_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/trpc/post.getAll
pub async fn get_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items = state.posts.get_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed_response(items))))
}

/// GET /api/trpc/post.getPostByUserId?userId=
pub async fn get_post_by_user_id(
    state: web::Data<AppState>,
    query: web::Query<PostsByUserQuery>,
) -> AppResult<HttpResponse> {
    let items = state.posts.get_posts_by_user_id(&query.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed_response(items))))
}

/// GET /api/trpc/post.getById?id=
pub async fn get_by_id(
    state: web::Data<AppState>,
    query: web::Query<PostByIdQuery>,
) -> AppResult<HttpResponse> {
    let item = state.posts.get_by_id(&query.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed_item_response(item))))
}

/// POST /api/trpc/post.create
///
/// The session is checked before the body is read.
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(&identity.user_id, &body.content).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}
