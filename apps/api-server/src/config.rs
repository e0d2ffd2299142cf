//! Application configuration loaded from environment variables.

use std::env;

use chirp_core::ports::AuthError;
use chirp_infra::{DatabaseConfig, JwtConfig, RateLimitConfig};

#[cfg(feature = "directory")]
use chirp_infra::HttpDirectoryConfig;
#[cfg(feature = "redis")]
use chirp_infra::RedisConfig;

/// Application configuration.
///
/// Backends left unset fall back to in-memory adapters.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
    pub rate_limit: RateLimitConfig,
    #[cfg(feature = "directory")]
    pub directory: Option<HttpDirectoryConfig>,
    /// JSON file of users for the in-memory directory.
    pub directory_seed_file: Option<String>,
    pub session: JwtConfig,
    pub site: SiteConfig,
}

/// Settings the page layer needs.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Where the identity provider's hosted sign-in lives.
    pub sign_in_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sign_in_url: "/sign-in".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when no usable session key is configured.
    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            #[cfg(feature = "directory")]
            directory: HttpDirectoryConfig::from_env(),
            directory_seed_file: env::var("DIRECTORY_SEED_FILE").ok(),
            session: JwtConfig::from_env()?,
            site: SiteConfig {
                sign_in_url: env::var("SIGN_IN_URL")
                    .unwrap_or_else(|_| SiteConfig::default().sign_in_url),
            },
        })
    }
}
