//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use chirp_core::domain::Post;
use chirp_core::error::RepoError;
use chirp_core::ports::{BaseRepository, PostOrder, PostQuery, PostRepository};

/// Post store backed by a vector behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        rows.push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;

        let mut posts: Vec<Post> = rows
            .iter()
            .filter(|p| query.author_id.as_ref().is_none_or(|a| &p.author_id == a))
            .cloned()
            .collect();

        match query.order {
            PostOrder::CreatedAtDesc => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        if let Some(limit) = query.limit {
            posts.truncate(limit as usize);
        }

        Ok(posts)
    }
}
