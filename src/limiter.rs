// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter keyed by client identifier.
//!
//! Each identifier owns one counter and the instant its window opened.
//! The first request in a window opens it; requests are admitted until
//! the counter reaches `max_requests`, and the window resets once more
//! than `window_ms` has passed since it opened. A client can therefore
//! land up to `2 * max_requests` requests across a window boundary.
//!
//! State is local to the process. Behind a horizontally scaled deployment
//! every instance counts on its own, so the effective limit becomes
//! `max_requests * instances`.

use crate::config::{ConfigError, RateLimitConfig};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Whole seconds until the window resets, rounded up
        retry_after_secs: u64,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Counter state for one identifier.
#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitEntry {
    fn open(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.window_start)
    }

    fn is_expired(&self, now: Instant, window: Duration) -> bool {
        self.elapsed(now) > window
    }
}

/// Entries plus an index of their window starts, oldest first.
#[derive(Debug, Default)]
struct Windows {
    entries: HashMap<String, RateLimitEntry>,
    by_start: BTreeSet<(Instant, String)>,
}

impl Windows {
    /// Start a new window for `identifier`, replacing any previous one.
    fn open(&mut self, identifier: &str, now: Instant) {
        if let Some(previous) = self
            .entries
            .insert(identifier.to_owned(), RateLimitEntry::open(now))
        {
            self.by_start
                .remove(&(previous.window_start, identifier.to_owned()));
        }
        self.by_start.insert((now, identifier.to_owned()));
    }

    /// Remove expired windows from the front of the index.
    fn evict_expired(&mut self, now: Instant, window: Duration) -> usize {
        let mut removed = 0;
        while let Some((start, _)) = self.by_start.first() {
            if now.saturating_duration_since(*start) <= window {
                break;
            }
            if let Some((_, identifier)) = self.by_start.pop_first() {
                self.entries.remove(&identifier);
                removed += 1;
            }
        }
        removed
    }

    fn oldest_start(&self) -> Option<Instant> {
        self.by_start.first().map(|(start, _)| *start)
    }
}

/// Thread-safe fixed-window rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<Windows>>,
}

impl RateLimiter {
    /// Create a rate limiter, failing on a zero window, limit or capacity.
    pub fn new(config: RateLimitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            windows: Arc::new(RwLock::new(Windows::default())),
        })
    }

    /// Configured requests per window.
    pub fn max_requests(&self) -> u32 {
        self.config.max_requests
    }

    /// Count a request for `identifier` and decide whether to admit it.
    ///
    /// The lookup and the increment happen under one write lock, so
    /// concurrent requests for the same identifier are serialized.
    ///
    /// When `max_entries` identifiers hold open windows, requests from
    /// identifiers not already tracked are limited until the oldest
    /// window expires. Tracked identifiers are never evicted early.
    pub async fn check(&self, identifier: &str) -> RateLimitResult {
        let now = Instant::now();
        let window = self.config.window_duration();
        let max = self.config.max_requests;

        let mut windows = self.windows.write().await;

        if windows.entries.len() >= self.config.max_entries
            && !windows.entries.contains_key(identifier)
        {
            windows.evict_expired(now, window);

            if windows.entries.len() >= self.config.max_entries {
                let retry_after_secs = windows
                    .oldest_start()
                    .map(|start| {
                        retry_after_secs(window.saturating_sub(now.saturating_duration_since(start)))
                    })
                    .unwrap_or(1);
                warn!(
                    identifier,
                    capacity = self.config.max_entries,
                    retry_after_secs,
                    "Rate limiter at capacity, refusing new identifier"
                );
                return RateLimitResult::Limited { retry_after_secs };
            }
        }

        let entry = match windows.entries.get(identifier).copied() {
            Some(entry) if !entry.is_expired(now, window) => entry,
            _ => {
                windows.open(identifier, now);
                return RateLimitResult::Allowed {
                    remaining: max - 1,
                    reset_in: window,
                };
            }
        };

        let reset_in = window.saturating_sub(entry.elapsed(now));

        if entry.count < max {
            let count = entry.count + 1;
            if let Some(stored) = windows.entries.get_mut(identifier) {
                stored.count = count;
            }
            RateLimitResult::Allowed {
                remaining: max - count,
                reset_in,
            }
        } else {
            let retry_after_secs = retry_after_secs(reset_in);
            debug!(identifier, retry_after_secs, "Rate limit exceeded");
            RateLimitResult::Limited { retry_after_secs }
        }
    }

    /// Drop every entry whose window has expired. Returns the number removed.
    pub async fn cleanup(&self) -> usize {
        let now = Instant::now();
        let window = self.config.window_duration();
        self.windows.write().await.evict_expired(now, window)
    }

    /// Number of identifiers currently tracked.
    pub async fn len(&self) -> usize {
        self.windows.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.windows.read().await.entries.is_empty()
    }
}

/// Round a remaining window up to whole seconds, never below one.
fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_millis().div_ceil(1000) as u64;
    secs.max(1)
}
