//! Application state - shared across all handlers.

use std::sync::Arc;

use chirp_core::ports::{
    AuthError, IdentityError, IdentityLookup, PostRepository, RateLimitError, RateLimiter,
    SessionVerifier,
};
use chirp_core::services::{PostService, ProfileService};
use chirp_infra::{
    InMemoryDirectory, InMemoryPostRepository, InMemoryRateLimiter, JwtSessionVerifier,
};

use crate::config::{AppConfig, SiteConfig};

/// Shared application state. Every backend is built once at startup and
/// injected here.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub profiles: ProfileService,
    pub sessions: Arc<dyn SessionVerifier>,
    pub site: SiteConfig,
}

/// A configured backend could not be brought up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),

    #[error("rate limiter unavailable: {0}")]
    RateLimiter(#[from] RateLimitError),

    #[error("user directory unavailable: {0}")]
    Directory(#[from] IdentityError),

    #[error("session verifier misconfigured: {0}")]
    Session(#[from] AuthError),
}

impl AppState {
    /// Assemble state from already-built adapters.
    pub fn from_parts(
        posts: Arc<dyn PostRepository>,
        identity: Arc<dyn IdentityLookup>,
        limiter: Arc<dyn RateLimiter>,
        sessions: Arc<dyn SessionVerifier>,
        site: SiteConfig,
    ) -> Self {
        Self {
            posts: PostService::new(posts, identity.clone(), limiter),
            profiles: ProfileService::new(identity),
            sessions,
            site,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let posts = build_post_repository(config).await?;
        let identity = build_directory(config).await?;
        let limiter = build_rate_limiter(config).await?;
        let sessions: Arc<dyn SessionVerifier> =
            Arc::new(JwtSessionVerifier::new(config.session.clone())?);

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(
            posts,
            identity,
            limiter,
            sessions,
            config.site.clone(),
        ))
    }
}

async fn build_post_repository(
    config: &AppConfig,
) -> Result<Arc<dyn PostRepository>, StartupError> {
    #[cfg(feature = "postgres")]
    if let Some(db_config) = &config.database {
        use chirp_infra::{DatabaseConnections, PostgresPostRepository};

        let connections = DatabaseConnections::init(db_config)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        return Ok(Arc::new(PostgresPostRepository::new(connections.main)));
    }

    if config.database.is_some() {
        tracing::warn!("DATABASE_URL set but postgres feature disabled - using in-memory posts");
    } else {
        tracing::warn!("DATABASE_URL not set. Running with in-memory posts.");
    }
    Ok(Arc::new(InMemoryPostRepository::new()))
}

async fn build_directory(config: &AppConfig) -> Result<Arc<dyn IdentityLookup>, StartupError> {
    #[cfg(feature = "directory")]
    if let Some(directory_config) = &config.directory {
        use chirp_infra::HttpDirectory;

        let directory = HttpDirectory::new(directory_config.clone())?;
        directory.probe().await?;
        return Ok(Arc::new(directory));
    }

    match &config.directory_seed_file {
        Some(path) => {
            tracing::warn!(path = %path, "Using seeded in-memory user directory");
            Ok(Arc::new(InMemoryDirectory::from_json_file(path)?))
        }
        None => {
            tracing::warn!("IDENTITY_SECRET_KEY not set. Running with an empty in-memory directory.");
            Ok(Arc::new(InMemoryDirectory::new()))
        }
    }
}

async fn build_rate_limiter(config: &AppConfig) -> Result<Arc<dyn RateLimiter>, StartupError> {
    #[cfg(feature = "redis")]
    if let Some(redis_config) = &config.redis {
        use chirp_infra::{RedisRateLimitConfig, RedisRateLimiter};

        let mut limiter_config = RedisRateLimitConfig::new(redis_config.clone());
        limiter_config.policy = config.rate_limit.clone();
        return Ok(Arc::new(RedisRateLimiter::new(limiter_config).await?));
    }

    tracing::warn!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window.as_secs(),
        "REDIS_URL not set. Rate limits are per process."
    );
    Ok(Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())))
}
