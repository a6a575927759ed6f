use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::error::AppError;
use crate::state::AppState;

// Rate limit entry - tracks requests per IP/key
#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: TimeDelta,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        let window = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
        Self {
            entries: DashMap::new(),
            max_requests,
            window,
        }
    }

    // Entry stays locked for the whole read-modify-write
    pub fn check(&self, key: &str, now: DateTime<Utc>) -> Result<RateLimitStatus, AppError> {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                reset_at: self.window_end(now),
            });

        // window over..? start a new one
        if now > entry.reset_at {
            entry.count = 1;
            entry.reset_at = self.window_end(now);
        } else {
            entry.count = entry.count.saturating_add(1);
        }

        if entry.count > self.max_requests {
            let millis = (entry.reset_at - now).num_milliseconds().max(0) as u64;
            return Err(AppError::RateLimited {
                retry_after_secs: millis.div_ceil(1000),
            });
        }

        Ok(RateLimitStatus {
            limit: self.max_requests,
            remaining: self.max_requests - entry.count,
            reset_at: entry.reset_at,
        })
    }

    fn window_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.reset_at >= now);
        before.saturating_sub(self.entries.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}

// Periodic sweep of expired windows, keeps the map bounded by active clients
pub async fn sweeper(state: Arc<AppState>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!(interval = ?every, "Rate limit sweeper started");

    loop {
        interval.tick().await;

        let removed = state.rate_limiter.sweep_expired(Utc::now());
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = state.rate_limiter.tracked_clients(),
                "Swept expired rate limit entries"
            );
        }
    }
}
