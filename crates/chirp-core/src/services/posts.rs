//! Post procedures: create, global feed, profile feed, single post.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AuthorView, FeedItem, Post, PostContent};
use crate::error::DomainError;
use crate::ports::{IdentityLookup, PostQuery, PostRepository, RateLimiter};

use super::{AUTHOR_NOT_FOUND, FeedService};

/// Fixed page size for every feed listing.
pub const FEED_PAGE_SIZE: u64 = 100;

const POST_NOT_FOUND: &str = "Post not found";

/// Post use cases.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    identity: Arc<dyn IdentityLookup>,
    limiter: Arc<dyn RateLimiter>,
    feed: FeedService,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        identity: Arc<dyn IdentityLookup>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let feed = FeedService::new(identity.clone());
        Self {
            posts,
            identity,
            limiter,
            feed,
        }
    }

    /// Create a post for an authenticated user.
    ///
    /// Content is validated before the rate limiter is consulted, so a
    /// rejected body never spends a permit.
    pub async fn create(&self, author_id: &str, content: &str) -> Result<Post, DomainError> {
        let content = PostContent::parse(content)?;

        let decision = self.limiter.check(author_id).await?;
        if !decision.success {
            tracing::warn!(
                author_id = %author_id,
                reset_after_secs = decision.reset_after.as_secs(),
                "Post rate limit exceeded"
            );
            return Err(DomainError::RateLimited(
                "You are doing that too much.".to_string(),
            ));
        }

        let post = self.posts.save(Post::new(author_id, content)).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// The newest posts across all users.
    pub async fn get_all(&self) -> Result<Vec<FeedItem>, DomainError> {
        let posts = self.posts.list(PostQuery::latest(FEED_PAGE_SIZE)).await?;
        self.feed.compose(posts).await
    }

    /// The newest posts written by one user.
    pub async fn get_posts_by_user_id(&self, user_id: &str) -> Result<Vec<FeedItem>, DomainError> {
        let query = PostQuery::latest(FEED_PAGE_SIZE).by_author(user_id);
        let posts = self.posts.list(query).await?;
        self.feed.compose(posts).await
    }

    /// A single post with its author. Ids that are not UUIDs cannot exist.
    pub async fn get_by_id(&self, id: &str) -> Result<FeedItem, DomainError> {
        let id = Uuid::parse_str(id).map_err(|_| DomainError::NotFound(POST_NOT_FOUND.into()))?;

        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(POST_NOT_FOUND.into()))?;

        let author = self
            .identity
            .users_by_ids(std::slice::from_ref(&post.author_id), 1)
            .await?
            .into_iter()
            .find(|user| user.id == post.author_id)
            .map(AuthorView::from)
            .ok_or_else(|| DomainError::NotFound(AUTHOR_NOT_FOUND.into()))?;

        FeedItem::join(post, author).ok_or_else(|| DomainError::NotFound(AUTHOR_NOT_FOUND.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FakeDirectory, FakeLimiter, FakePosts};
    use chrono::{Duration, Utc};

    struct Fixture {
        posts: Arc<FakePosts>,
        limiter: Arc<FakeLimiter>,
        service: PostService,
    }

    fn fixture_with(posts: FakePosts, limiter: FakeLimiter) -> Fixture {
        let posts = Arc::new(posts);
        let limiter = Arc::new(limiter);
        let directory = Arc::new(FakeDirectory::with_users(&["user_a", "user_b"]));
        let service = PostService::new(posts.clone(), directory, limiter.clone());
        Fixture {
            posts,
            limiter,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(FakePosts::default(), FakeLimiter::new(3))
    }

    fn aged_post(author: &str, minutes_ago: i64) -> Post {
        let mut post = Post::new(author, PostContent::parse("🐦").unwrap());
        post.created_at = Utc::now() - Duration::minutes(minutes_ago);
        post
    }

    #[tokio::test]
    async fn test_create_returns_post_without_author() {
        let f = fixture();

        let post = f.service.create("user_a", "🔥").await.unwrap();

        assert_eq!(post.author_id, "user_a");
        assert_eq!(post.content, "🔥");
        assert_eq!(f.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_content() {
        let f = fixture();
        let too_long = "😀".repeat(281);

        for content in ["", "hello", too_long.as_str()] {
            let result = f.service.create("user_a", content).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
        assert_eq!(f.posts.len(), 0);
    }

    #[tokio::test]
    async fn test_invalid_content_does_not_spend_permit() {
        let f = fixture();

        let _ = f.service.create("user_a", "not emoji").await;

        assert_eq!(f.limiter.used("user_a"), 0);
    }

    #[tokio::test]
    async fn test_fourth_post_in_window_is_rate_limited() {
        let f = fixture();

        for _ in 0..3 {
            f.service.create("user_a", "😀").await.unwrap();
        }
        let fourth = f.service.create("user_a", "😀").await;

        assert!(matches!(fourth, Err(DomainError::RateLimited(_))));
        assert_eq!(f.posts.len(), 3);

        // A different user has their own window
        assert!(f.service.create("user_b", "😀").await.is_ok());
    }

    #[tokio::test]
    async fn test_limiter_failure_is_internal_and_creates_nothing() {
        let f = fixture_with(FakePosts::default(), FakeLimiter::broken());

        let result = f.service.create("user_a", "😀").await;

        assert!(matches!(result, Err(DomainError::Internal(_))));
        assert_eq!(f.posts.len(), 0);
    }

    #[tokio::test]
    async fn test_get_all_is_newest_first() {
        let rows = vec![
            aged_post("user_a", 30),
            aged_post("user_b", 5),
            aged_post("user_a", 60),
        ];
        let f = fixture_with(FakePosts::with_rows(rows), FakeLimiter::new(3));

        let feed = f.service.get_all().await.unwrap();

        assert_eq!(feed.len(), 3);
        assert!(
            feed.windows(2)
                .all(|w| w[0].post.created_at >= w[1].post.created_at)
        );
    }

    #[tokio::test]
    async fn test_get_all_caps_page_size() {
        let rows = (0..(FEED_PAGE_SIZE as i64 + 20))
            .map(|i| aged_post("user_a", i))
            .collect();
        let f = fixture_with(FakePosts::with_rows(rows), FakeLimiter::new(3));

        let feed = f.service.get_all().await.unwrap();

        assert_eq!(feed.len(), FEED_PAGE_SIZE as usize);
    }

    #[tokio::test]
    async fn test_get_posts_by_user_id_filters_author() {
        let rows = vec![
            aged_post("user_a", 3),
            aged_post("user_b", 2),
            aged_post("user_a", 1),
        ];
        let f = fixture_with(FakePosts::with_rows(rows), FakeLimiter::new(3));

        let feed = f.service.get_posts_by_user_id("user_a").await.unwrap();

        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|item| item.author.id == "user_a"));
        assert!(feed[0].post.created_at > feed[1].post.created_at);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let post = aged_post("user_b", 1);
        let id = post.id.to_string();
        let f = fixture_with(FakePosts::with_rows(vec![post]), FakeLimiter::new(3));

        let item = f.service.get_by_id(&id).await.unwrap();

        assert_eq!(item.post.id.to_string(), id);
        assert_eq!(item.author.username.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let f = fixture();

        let missing = f.service.get_by_id(&Uuid::new_v4().to_string()).await;
        let malformed = f.service.get_by_id("not-a-uuid").await;

        assert!(matches!(missing, Err(DomainError::NotFound(_))));
        assert!(matches!(malformed, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_author_is_not_found() {
        let post = aged_post("ghost", 1);
        let id = post.id.to_string();
        let f = fixture_with(FakePosts::with_rows(vec![post]), FakeLimiter::new(3));

        let result = f.service.get_by_id(&id).await;

        match result {
            Err(DomainError::NotFound(msg)) => assert_eq!(msg, "Author for post not found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }
}
