//! Data Transfer Objects - procedure inputs and outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input of `post.create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Input of `post.getPostByUserId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsByUserQuery {
    pub user_id: String,
}

/// Input of `post.getById`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostByIdQuery {
    pub id: String,
}

/// Input of `profile.getUserByUsername`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Public identity of a post author. Exactly these three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub username: Option<String>,
    pub image_url: String,
}

/// A post with its author attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItemResponse {
    pub post: PostResponse,
    pub author: AuthorResponse,
}
