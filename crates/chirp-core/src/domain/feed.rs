use serde::{Deserialize, Serialize};

use super::{AuthorView, Post};

/// A post joined with its author's display identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub post: Post,
    pub author: AuthorView,
}

impl FeedItem {
    /// Join a post with its author. Returns `None` when the author record
    /// belongs to someone else.
    pub fn join(post: Post, author: AuthorView) -> Option<Self> {
        (author.id == post.author_id).then_some(Self { post, author })
    }
}
