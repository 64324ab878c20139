// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the testimonial API.
//!
//! Defaults mirror the limits the portfolio site applies to its public
//! testimonial form: 5 submissions per client per minute, 100-character
//! name and role, 500-character comment.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors detected at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate limit window must be positive, got {0} ms")]
    ZeroWindow(u64),

    #[error("rate limit max_requests must be positive")]
    ZeroMaxRequests,

    #[error("rate limit max_entries must be positive")]
    ZeroMaxEntries,
}

/// Configuration for the testimonial API service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Maximum accepted request body in bytes (default: 1 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Submission validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Requests admitted per client per window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Upper bound on tracked client identifiers (default: 100000)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Interval between background sweeps of expired windows (default: 60)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Limits and fallbacks applied to testimonial submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum name length in characters (default: 100)
    #[serde(default = "default_short_field_len")]
    pub max_name_len: usize,

    /// Maximum role length in characters (default: 100)
    #[serde(default = "default_short_field_len")]
    pub max_role_len: usize,

    /// Maximum comment length in characters (default: 500)
    #[serde(default = "default_comment_len")]
    pub max_comment_len: usize,

    /// Prefix an image value must carry to be stored verbatim
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,

    /// Image path used when the submitted image is not accepted
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage path, or "memory" for the embedded in-memory engine
    #[serde(default = "default_store_path")]
    pub path: String,

    /// SurrealDB namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// SurrealDB database
    #[serde(default = "default_database")]
    pub database: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_requests() -> u32 {
    5
}

fn default_max_entries() -> usize {
    100_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_short_field_len() -> usize {
    100
}

fn default_comment_len() -> usize {
    500
}

fn default_image_prefix() -> String {
    "data:image/".to_string()
}

fn default_placeholder_image() -> String {
    "/images/default-avatar.png".to_string()
}

fn default_store_path() -> String {
    "memory".to_string()
}

fn default_namespace() -> String {
    "portfolio".to_string()
}

fn default_database() -> String {
    "testimonials".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            store: StoreConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            max_requests: default_max_requests(),
            max_entries: default_max_entries(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_short_field_len(),
            max_role_len: default_short_field_len(),
            max_comment_len: default_comment_len(),
            image_prefix: default_image_prefix(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            namespace: default_namespace(),
            database: default_database(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Get the sweep interval
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Reject configurations the limiter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_ms == 0 {
            return Err(ConfigError::ZeroWindow(self.window_ms));
        }
        if self.max_requests == 0 {
            return Err(ConfigError::ZeroMaxRequests);
        }
        if self.max_entries == 0 {
            return Err(ConfigError::ZeroMaxEntries);
        }
        Ok(())
    }
}
