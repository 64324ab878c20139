// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Abuse patterns for security testing.

use std::time::Duration;

/// Abuse pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Simulated time between submissions
    pub interval: Duration,
    /// Number of distinct client addresses
    pub unique_ips: usize,
    /// Send no proxy headers at all
    pub omit_headers: bool,
    /// Send malformed bodies instead of valid ones
    pub invalid_bodies: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            interval: Duration::from_millis(100),
            unique_ips: 1,
            omit_headers: false,
            invalid_bodies: false,
        }
    }
}

/// Predefined abuse patterns.
impl AttackConfig {
    /// Single client flooding the form.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 200,
            interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Many clients, each submitting a handful of times.
    pub fn distributed_spam() -> Self {
        Self {
            total_requests: 1_000,
            interval: Duration::from_millis(1),
            unique_ips: 250,
            ..Default::default()
        }
    }

    /// Clients without proxy headers all share the "unknown" bucket.
    pub fn headerless_flood() -> Self {
        Self {
            total_requests: 50,
            interval: Duration::from_millis(10),
            unique_ips: 50,
            omit_headers: true,
            ..Default::default()
        }
    }

    /// Slow, steady submissions spaced beyond the window.
    pub fn slow_drip(window: Duration) -> Self {
        Self {
            total_requests: 20,
            interval: window + Duration::from_millis(1),
            ..Default::default()
        }
    }

    /// Garbage bodies sent under the limit.
    pub fn malformed_payloads() -> Self {
        Self {
            total_requests: 40,
            interval: Duration::from_secs(61),
            invalid_bodies: true,
            ..Default::default()
        }
    }
}
