//! # Chirp Infrastructure
//!
//! Concrete implementations of the ports defined in `chirp-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `auth` - JWT session verification
//! - `redis` - Redis sliding-window rate limiter
//! - `directory` - HTTP client for the identity provider's user directory

pub mod database;
pub mod directory;
pub mod rate_limit;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use directory::InMemoryDirectory;
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtSessionVerifier, SessionKey};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};

#[cfg(feature = "directory")]
pub use directory::{HttpDirectory, HttpDirectoryConfig};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use rate_limit::{RedisConfig, RedisRateLimitConfig, RedisRateLimiter};
