//! Redis rate limiter implementation using a weighted sliding window.
//!
//! Each key keeps one counter per fixed window. A request is admitted when
//! the current window's count plus the previous window's count, scaled by
//! how much of the previous window still overlaps the sliding window, stays
//! under the limit.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Script};

use chirp_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

use super::RateLimitConfig;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load from `REDIS_URL`. `None` when no URL is set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok()?;
        Some(Self {
            url,
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        })
    }
}

/// Redis rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RedisRateLimitConfig {
    /// Redis connection config
    pub redis: RedisConfig,
    /// Window policy
    pub policy: RateLimitConfig,
    /// Key prefix for rate limit keys
    pub key_prefix: String,
}

impl RedisRateLimitConfig {
    pub fn new(redis: RedisConfig) -> Self {
        Self {
            redis,
            policy: RateLimitConfig::from_env(),
            key_prefix: std::env::var("RATE_LIMIT_KEY_PREFIX")
                .unwrap_or_else(|_| "ratelimit:post".to_string()),
        }
    }
}

// KEYS: current window counter, previous window counter
// ARGV: limit, now (ms), window (ms)
// Returns: {admitted (0|1), remaining}
const SLIDING_WINDOW_SCRIPT: &str = r#"
local current_key = KEYS[1]
local previous_key = KEYS[2]
local limit = tonumber(ARGV[1])
local now_ms = tonumber(ARGV[2])
local window_ms = tonumber(ARGV[3])

local current = tonumber(redis.call('GET', current_key) or '0')
local previous = tonumber(redis.call('GET', previous_key) or '0')
local overlap = 1 - ((now_ms % window_ms) / window_ms)
local carried = math.floor(overlap * previous)

if carried + current >= limit then
    return {0, 0}
end

current = redis.call('INCR', current_key)
if current == 1 then
    redis.call('PEXPIRE', current_key, window_ms * 2 + 1000)
end

return {1, limit - carried - current}
"#;

/// Redis-backed sliding window limiter. Counters are shared by every
/// process pointing at the same Redis.
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    config: RedisRateLimitConfig,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(config: RedisRateLimitConfig) -> Result<Self, RateLimitError> {
        let client = Client::open(config.redis.url.as_str())
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.redis.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| RateLimitError::Backend("Connection timed out".to_string()))?
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        tracing::info!(
            url = %config.redis.url,
            max_requests = config.policy.max_requests,
            window_secs = config.policy.window.as_secs(),
            "Connected to Redis rate limiter"
        );

        Ok(Self {
            conn,
            config,
            script: Script::new(SLIDING_WINDOW_SCRIPT),
        })
    }

    fn window_ms(&self) -> i64 {
        (self.config.policy.window.as_millis() as i64).max(1)
    }

    fn window_key(&self, key: &str, bucket: i64) -> String {
        format!("{}:{}:{}", self.config.key_prefix, key, bucket)
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = self.window_ms();
        let bucket = now_ms / window_ms;
        let mut conn = self.conn.clone();

        let result: Vec<i64> = self
            .script
            .key(self.window_key(key, bucket))
            .key(self.window_key(key, bucket - 1))
            .arg(self.config.policy.max_requests)
            .arg(now_ms)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let success = result.first().copied().unwrap_or(0) == 1;
        let remaining = result.get(1).copied().unwrap_or(0).max(0) as u32;
        let reset_after = Duration::from_millis((window_ms - now_ms % window_ms) as u64);

        Ok(RateLimitResult {
            success,
            remaining,
            reset_after,
        })
    }
}
