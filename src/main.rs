// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Testimonial API Service
//!
//! Serves `GET /api/testimonials` and `POST /api/testimonials`, with
//! per-client rate limiting and validation on submissions.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_WINDOW_MS`: Rate limit window in milliseconds (default: 60000)
//! - `RATE_LIMIT_MAX`: Submissions per client per window (default: 5)
//! - `RATE_LIMIT_MAX_ENTRIES`: Tracked client cap (default: 100000)
//! - `SWEEP_INTERVAL_SECS`: Expired window sweep interval (default: 60)
//! - `MAX_BODY_BYTES`: Request body limit (default: 1048576)
//! - `STORE_PATH`: "memory" or a RocksDB path (default: memory)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)
//!
//! Each instance keeps its own rate limit counters.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use testimonial_api::{
    config::Config,
    db::Database,
    handlers::{router, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    validator::TestimonialValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        window_ms = config.rate_limit.window_ms,
        max_requests = config.rate_limit.max_requests,
        store = %config.store.path,
        "Starting testimonial API"
    );

    // Create application state
    let limiter = RateLimiter::new(config.rate_limit.clone())?;
    let validator = TestimonialValidator::new(config.validation.clone());
    let store = Database::connect(&config.store).await?;
    let metrics = Metrics::new()?;

    let state = Arc::new(AppState {
        limiter,
        validator,
        store,
        metrics,
        config: config.clone(),
    });

    // Spawn cleanup task
    let cleanup_state = state.clone();
    let sweep_interval = config.rate_limit.sweep_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            let removed = cleanup_state.limiter.cleanup().await;
            let tracked = cleanup_state.limiter.len().await;
            cleanup_state.metrics.tracked_clients.set(tracked as i64);
            debug!(removed, tracked, "Swept expired rate limit windows");
        }
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let mut config = Config::default();

    if let Ok(addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(path) = std::env::var("STORE_PATH") {
        config.store.path = path;
    }
    if let Some(window_ms) = env_parse("RATE_LIMIT_WINDOW_MS") {
        config.rate_limit.window_ms = window_ms;
    }
    if let Some(max_requests) = env_parse("RATE_LIMIT_MAX") {
        config.rate_limit.max_requests = max_requests;
    }
    if let Some(max_entries) = env_parse("RATE_LIMIT_MAX_ENTRIES") {
        config.rate_limit.max_entries = max_entries;
    }
    if let Some(secs) = env_parse("SWEEP_INTERVAL_SECS") {
        config.rate_limit.sweep_interval_secs = secs;
    }
    if let Some(bytes) = env_parse("MAX_BODY_BYTES") {
        config.max_body_bytes = bytes;
    }
    if let Some(enabled) = env_parse("METRICS_ENABLED") {
        config.metrics.enabled = enabled;
    }

    config
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
