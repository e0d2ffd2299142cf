//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use chirp_core::domain::Post;
use chirp_core::error::RepoError;
use chirp_core::ports::{PostOrder, PostQuery, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?query, "Listing posts");

        let mut select = PostEntity::find();
        if let Some(author_id) = &query.author_id {
            select = select.filter(post::Column::AuthorId.eq(author_id.as_str()));
        }
        select = match query.order {
            PostOrder::CreatedAtDesc => select.order_by_desc(post::Column::CreatedAt),
        };
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
