//! Page handlers.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header, web};
use chrono::Utc;
use serde_json::json;

use chirp_core::DomainError;
use chirp_shared::dto::{CreatePostRequest, FeedItemResponse};

use super::html::{DehydratedState, escape_html, feed_view, layout, post_view};
use super::{PageError, PageResult};
use crate::handlers::convert::{author_response, feed_item_response, feed_response};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppError;
use crate::state::AppState;

const CREATE_FAILED: &str = "Failed to create post";

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn compose_box(state: &AppState, identity: &OptionalIdentity) -> String {
    match &identity.0 {
        Some(_) => r#"<form class="compose" method="post" action="/">
<input name="content" placeholder="Type some emojis!" autocomplete="off" maxlength="280">
<button type="submit">Post</button>
</form>"#
            .to_string(),
        None => format!(
            r#"<div class="sign-in"><a href="{}">Sign in</a></div>"#,
            escape_html(&state.site.sign_in_url)
        ),
    }
}

async fn render_home(
    state: &AppState,
    identity: &OptionalIdentity,
    flash: Option<&str>,
    status: StatusCode,
) -> PageResult {
    let items: Vec<FeedItemResponse> = feed_response(state.posts.get_all().await?);

    let mut dehydrated = DehydratedState::new();
    dehydrated.insert("post.getAll", json!(null), &items);

    let flash = flash
        .map(|msg| format!(r#"<div class="flash" role="alert">{}</div>"#, escape_html(msg)))
        .unwrap_or_default();

    let body = format!(
        "{}\n{}\n{}",
        compose_box(state, identity),
        flash,
        feed_view(&items, Utc::now(), "No posts yet")
    );

    Ok(html(status, layout("Chirp", &body, &dehydrated)))
}

/// GET /
pub async fn home(state: web::Data<AppState>, identity: OptionalIdentity) -> PageResult {
    render_home(&state, &identity, None, StatusCode::OK).await
}

/// Message shown after a failed form submission.
fn flash_for(err: &DomainError) -> &str {
    match err {
        DomainError::Validation { field: "content", messages } => messages
            .first()
            .map(String::as_str)
            .unwrap_or(CREATE_FAILED),
        _ => CREATE_FAILED,
    }
}

/// POST /
///
/// Success redirects back to the feed; failure re-renders it with a flash.
pub async fn create_from_form(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<CreatePostRequest>,
) -> PageResult {
    let result = match &identity.0 {
        Some(user) => state.posts.create(&user.user_id, &form.content).await,
        None => Err(DomainError::Unauthorized),
    };

    match result {
        Ok(_) => Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .finish()),
        Err(err) => {
            tracing::debug!(error = %err, "Form post rejected");
            let flash = flash_for(&err).to_string();
            let status = AppError::from(err).status_code();
            render_home(&state, &identity, Some(&flash), status).await
        }
    }
}

/// GET /{slug}, where the slug is `@username`.
pub async fn profile(state: web::Data<AppState>, slug: web::Path<String>) -> PageResult {
    let username = slug
        .strip_prefix('@')
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PageError(AppError::NotFound("Page not found".to_string())))?;

    let author = state.profiles.get_user_by_username(username).await?;
    let items = feed_response(state.posts.get_posts_by_user_id(&author.id).await?);
    let author = author_response(author);

    let mut dehydrated = DehydratedState::new();
    dehydrated.insert(
        "profile.getUserByUsername",
        json!({ "username": username }),
        &author,
    );
    dehydrated.insert(
        "post.getPostByUserId",
        json!({ "userId": author.id }),
        &items,
    );

    let shown = author.username.as_deref().unwrap_or(username);
    let body = format!(
        r#"<header class="profile">
<img class="avatar" src="{image}" alt="@{name}'s profile picture" width="128" height="128">
<h1>@{name}</h1>
</header>
{feed}"#,
        image = escape_html(&author.image_url),
        name = escape_html(shown),
        feed = feed_view(&items, Utc::now(), "No posts yet"),
    );

    Ok(html(StatusCode::OK, layout(shown, &body, &dehydrated)))
}

/// GET /post/{id}
pub async fn single_post(state: web::Data<AppState>, id: web::Path<String>) -> PageResult {
    let id = id.into_inner();
    let item = feed_item_response(state.posts.get_by_id(&id).await?);

    let mut dehydrated = DehydratedState::new();
    dehydrated.insert("post.getById", json!({ "id": id }), &item);

    let title = format!(
        "{} - @{}",
        item.post.content,
        item.author.username.as_deref().unwrap_or(&item.author.id)
    );

    Ok(html(
        StatusCode::OK,
        layout(&title, &post_view(&item, Utc::now()), &dehydrated),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_prefers_first_content_message() {
        let err = chirp_core::domain::PostContent::parse(&"a".repeat(281)).unwrap_err();
        assert_eq!(flash_for(&err), "Only emojis are allowed.");

        let err = DomainError::Validation {
            field: "content",
            messages: vec!["String must contain at most 280 character(s)".into()],
        };
        assert_eq!(flash_for(&err), "String must contain at most 280 character(s)");
    }

    #[test]
    fn test_flash_falls_back() {
        assert_eq!(
            flash_for(&DomainError::RateLimited("You are doing that too much.".into())),
            CREATE_FAILED
        );
        assert_eq!(flash_for(&DomainError::Unauthorized), CREATE_FAILED);
    }
}
