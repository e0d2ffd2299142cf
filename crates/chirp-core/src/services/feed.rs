//! Feed composition: joins posts with their authors.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{AuthorView, FeedItem, Post};
use crate::error::DomainError;
use crate::ports::{IdentityLookup, MAX_DIRECTORY_BATCH};

use super::AUTHOR_NOT_FOUND;

/// Attaches author identities to posts.
#[derive(Clone)]
pub struct FeedService {
    identity: Arc<dyn IdentityLookup>,
}

impl FeedService {
    pub fn new(identity: Arc<dyn IdentityLookup>) -> Self {
        Self { identity }
    }

    /// Join every post with its author using one directory round trip.
    ///
    /// Output order follows input order. A single unresolved author fails
    /// the whole batch.
    pub async fn compose(&self, posts: Vec<Post>) -> Result<Vec<FeedItem>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let author_ids: Vec<String> = posts
            .iter()
            .filter(|post| seen.insert(post.author_id.as_str()))
            .map(|post| post.author_id.clone())
            .collect();

        if author_ids.len() > MAX_DIRECTORY_BATCH {
            return Err(DomainError::Internal(format!(
                "Feed spans {} authors, directory batch is {}",
                author_ids.len(),
                MAX_DIRECTORY_BATCH
            )));
        }

        let authors: HashMap<String, AuthorView> = self
            .identity
            .users_by_ids(&author_ids, author_ids.len())
            .await?
            .into_iter()
            .map(|user| (user.id.clone(), AuthorView::from(user)))
            .collect();

        tracing::debug!(
            posts = posts.len(),
            authors = authors.len(),
            "Composing feed"
        );

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned().ok_or_else(|| {
                    tracing::error!(post_id = %post.id, author_id = %post.author_id, "Author missing from directory");
                    DomainError::Internal(AUTHOR_NOT_FOUND.to_string())
                })?;
                FeedItem::join(post, author)
                    .ok_or_else(|| DomainError::Internal(AUTHOR_NOT_FOUND.to_string()))
            })
            .collect()
    }
}
