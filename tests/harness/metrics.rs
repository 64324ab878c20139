// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for abuse simulation results.

use std::collections::HashMap;

/// Possible outcomes for a simulated submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    RateLimited,
    InvalidPayload,
    MissingField,
}

/// Collects outcomes during a simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    outcomes: HashMap<Outcome, usize>,
    requests_per_client: HashMap<String, usize>,
    max_retry_after_secs: u64,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request outcome for `client`.
    pub fn record(&mut self, outcome: Outcome, client: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .requests_per_client
            .entry(client.to_string())
            .or_insert(0) += 1;
    }

    /// Remember the largest retry hint handed out.
    pub fn record_retry_after(&mut self, secs: u64) {
        self.max_retry_after_secs = self.max_retry_after_secs.max(secs);
    }

    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Ratio of requests that did not result in a stored testimonial.
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Accepted)) as f64 / total as f64
    }

    pub fn unique_clients(&self) -> usize {
        self.requests_per_client.len()
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            accepted: self.count(Outcome::Accepted),
            rate_limited: self.count(Outcome::RateLimited),
            validation_failed: self.count(Outcome::InvalidPayload)
                + self.count(Outcome::MissingField),
            block_rate: self.block_rate(),
            unique_clients: self.unique_clients(),
            max_retry_after_secs: self.max_retry_after_secs,
        }
    }
}

/// Summary report of a simulation.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub rate_limited: usize,
    pub validation_failed: usize,
    pub block_rate: f64,
    pub unique_clients: usize,
    pub max_retry_after_secs: u64,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Abuse Simulation Report ===")?;
        writeln!(f, "Total requests:    {}", self.total_requests)?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Rate limited:      {}", self.rate_limited)?;
        writeln!(f, "Validation failed: {}", self.validation_failed)?;
        writeln!(f, "Block rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f, "Unique clients:    {}", self.unique_clients)?;
        write!(f, "Max retry-after:   {} s", self.max_retry_after_secs)
    }
}
