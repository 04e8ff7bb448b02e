//! Rate limiter for login attempts

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of attempts allowed
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,       // 5 minutes
            ban_duration_seconds: 900, // 15 minutes
        }
    }
}

#[derive(Debug)]
struct RateLimiterEntry {
    attempts: u32,
    last_attempt: Instant,
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    fn new(now: Instant) -> Self {
        Self {
            attempts: 0,
            last_attempt: now,
            ban_expires: None,
        }
    }

    fn is_banned(&self, now: Instant) -> bool {
        self.ban_expires.is_some_and(|expires| now < expires)
    }

    /// Nothing left to remember: no live ban and the window has passed
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        !self.is_banned(now) && now.duration_since(self.last_attempt) >= window
    }
}

#[derive(Debug)]
struct AttemptTable {
    entries: HashMap<String, RateLimiterEntry>,
    last_sweep: Instant,
}

impl AttemptTable {
    /// Drop stale entries at most once per window
    fn sweep(&mut self, now: Instant, window: Duration) {
        if now.duration_since(self.last_sweep) < window {
            return;
        }

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(now, window));
        self.last_sweep = now;

        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("Evicted {} stale login rate limit entries", evicted);
        }
    }
}

/// Rate limiter keyed by an arbitrary string (login name here)
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    table: Arc<Mutex<AttemptTable>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            table: Arc::new(Mutex::new(AttemptTable {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    /// Record an attempt for `key` and report whether it may proceed
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut table = self.table.lock().await;
        let now = Instant::now();
        let window = self.window();

        table.sweep(now, window);

        let entry = table
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimiterEntry::new(now));

        if entry.is_banned(now) {
            return false;
        }
        if entry.ban_expires.take().is_some() || entry.is_stale(now, window) {
            entry.attempts = 0;
        }

        if entry.attempts >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            info!(
                "Blocked login for {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
            return false;
        }

        entry.attempts += 1;
        entry.last_attempt = now;

        true
    }

    /// Forget the attempts recorded for `key`, after a successful login
    pub async fn reset(&self, key: &str) {
        self.table.lock().await.entries.remove(key);
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.table.lock().await.entries.len()
    }
}
