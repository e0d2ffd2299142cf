//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod identity;
mod rate_limit;
mod repository;

pub use auth::{AuthError, SessionClaims, SessionVerifier};
pub use identity::{IdentityError, IdentityLookup, MAX_DIRECTORY_BATCH};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, PostOrder, PostQuery, PostRepository};
