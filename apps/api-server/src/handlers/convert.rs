//! Domain to wire conversions.

use chirp_core::domain::{AuthorView, FeedItem, Post};
use chirp_shared::dto::{AuthorResponse, FeedItemResponse, PostResponse};

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        content: post.content,
        created_at: post.created_at,
    }
}

pub fn author_response(author: AuthorView) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
        image_url: author.image_url,
    }
}

pub fn feed_item_response(item: FeedItem) -> FeedItemResponse {
    FeedItemResponse {
        post: post_response(item.post),
        author: author_response(item.author),
    }
}

pub fn feed_response(items: Vec<FeedItem>) -> Vec<FeedItemResponse> {
    items.into_iter().map(feed_item_response).collect()
}
