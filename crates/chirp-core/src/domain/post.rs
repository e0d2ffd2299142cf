use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PostContent;

/// Post entity - a short emoji-only message.
///
/// Posts are immutable once written. `author_id` is the opaque identifier of
/// a user record held by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from already-validated content.
    pub fn new(author_id: impl Into<String>, content: PostContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: author_id.into(),
            content: content.into_inner(),
            created_at: Utc::now(),
        }
    }
}
