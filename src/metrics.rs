// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for the testimonial API.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Counters exported on the metrics endpoint.
pub struct Metrics {
    registry: Registry,
    pub rate_limit_decisions: IntCounterVec,
    pub validation_failures: IntCounterVec,
    pub testimonials_created: IntCounter,
    pub store_failures: IntCounterVec,
    pub tracked_clients: IntGauge,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("testimonial_api".to_string()), None)?;

        let rate_limit_decisions = IntCounterVec::new(
            Opts::new("rate_limit_decisions_total", "Rate limiter decisions"),
            &["decision"],
        )?;
        let validation_failures = IntCounterVec::new(
            Opts::new("validation_failures_total", "Rejected submissions by kind"),
            &["kind"],
        )?;
        let testimonials_created =
            IntCounter::new("testimonials_created_total", "Testimonials persisted")?;
        let store_failures = IntCounterVec::new(
            Opts::new("store_failures_total", "Document store failures"),
            &["operation"],
        )?;
        let tracked_clients = IntGauge::new(
            "rate_limit_tracked_clients",
            "Client identifiers held by the rate limiter",
        )?;

        registry.register(Box::new(rate_limit_decisions.clone()))?;
        registry.register(Box::new(validation_failures.clone()))?;
        registry.register(Box::new(testimonials_created.clone()))?;
        registry.register(Box::new(store_failures.clone()))?;
        registry.register(Box::new(tracked_clients.clone()))?;

        Ok(Self {
            registry,
            rate_limit_decisions,
            validation_failures,
            testimonials_created,
            store_failures,
            tracked_clients,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
    }
}
