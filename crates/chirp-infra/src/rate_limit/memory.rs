//! In-memory sliding-log rate limiter.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use chirp_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Sliding window policy.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum permits per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

/// Checks between sweeps of keys whose whole log has aged out.
const SWEEP_EVERY: u64 = 256;

#[derive(Default)]
struct Hits {
    logs: HashMap<String, VecDeque<Instant>>,
    checks: u64,
}

impl Hits {
    fn sweep(&mut self, now: Instant, window: Duration) {
        self.logs.retain(|_, log| {
            log.back()
                .is_some_and(|last| now.duration_since(*last) < window)
        });
    }
}

/// Per-key sliding log of permit timestamps.
///
/// Exact within one process; limits are not shared across instances.
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    hits: Mutex<Hits>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            hits: Mutex::new(Hits::default()),
        }
    }

    /// Forget keys with no permit left inside the window.
    pub async fn cleanup(&self) {
        let mut hits = self.hits.lock().await;
        hits.sweep(Instant::now(), self.config.window);
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.hits.lock().await.logs.len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let now = Instant::now();
        let window = self.config.window;
        let max = self.config.max_requests as usize;

        let mut hits = self.hits.lock().await;
        hits.checks += 1;
        if hits.checks % SWEEP_EVERY == 0 {
            hits.sweep(now, window);
        }

        let log = hits.logs.entry(key.to_string()).or_default();

        while log
            .front()
            .is_some_and(|first| now.duration_since(*first) >= window)
        {
            log.pop_front();
        }

        let success = log.len() < max;
        if success {
            log.push_back(now);
        }

        let reset_after = log
            .front()
            .map(|first| (*first + window).saturating_duration_since(now))
            .unwrap_or(window);
        let remaining = max.saturating_sub(log.len()) as u32;

        if log.is_empty() {
            hits.logs.remove(key);
        }

        Ok(RateLimitResult {
            success,
            remaining,
            reset_after,
        })
    }
}
