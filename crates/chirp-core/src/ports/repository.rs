use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait for append-only records.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert an entity and return the stored row.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Sort order for post listings. Listings never rely on storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    #[default]
    CreatedAtDesc,
}

/// Filter and page for a post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub author_id: Option<String>,
    pub order: PostOrder,
    pub limit: Option<u64>,
}

impl PostQuery {
    /// Newest posts first, at most `limit`.
    pub fn latest(limit: u64) -> Self {
        Self {
            author_id: None,
            order: PostOrder::CreatedAtDesc,
            limit: Some(limit),
        }
    }

    pub fn by_author(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError>;
}
