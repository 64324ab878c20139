// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Testimonial API
//!
//! Accepts and lists user-submitted testimonials for a portfolio site,
//! guarding the write path with:
//!
//! - Per-client fixed-window rate limiting (5 per minute default)
//! - Client identification from proxy headers
//! - Required-field checks with silent truncation of long input
//! - Rejection of any image that is not an inline data URI

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod models;
pub mod validator;

pub use config::Config;
pub use db::{Database, TestimonialStore};
pub use error::AppError;
pub use limiter::{RateLimitResult, RateLimiter};
pub use validator::{TestimonialValidator, ValidationError};
