// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the testimonial API.
//!
//! Write path: resolve client identifier, consult the rate limiter,
//! validate the body, persist, respond. Reads always answer with a JSON
//! array, falling back to `[]` when the store fails.

use crate::client::resolve_client_id;
use crate::config::Config;
use crate::db::TestimonialStore;
use crate::error::AppError;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::metrics::Metrics;
use crate::models::{PublicTestimonial, SortOrder, Testimonial};
use crate::validator::TestimonialValidator;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared application state.
pub struct AppState<S> {
    pub limiter: RateLimiter,
    pub validator: TestimonialValidator,
    pub store: S,
    pub metrics: Metrics,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router<S: TestimonialStore>(state: Arc<AppState<S>>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route(
            "/api/testimonials",
            get(list_testimonials::<S>).post(create_testimonial::<S>),
        );

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(render_metrics::<S>));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    router
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "testimonial-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// List testimonials, newest first. Submitter addresses are not exposed.
pub async fn list_testimonials<S: TestimonialStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Response {
    match state.store.find(SortOrder::NewestFirst).await {
        Ok(testimonials) => {
            debug!(count = testimonials.len(), "Listing testimonials");
            let listing: Vec<PublicTestimonial> =
                testimonials.into_iter().map(PublicTestimonial::from).collect();
            (StatusCode::OK, Json(safe_json(&listing))).into_response()
        }
        Err(err) => {
            error!(error = %err, "Failed to load testimonials");
            state
                .metrics
                .store_failures
                .with_label_values(&["find"])
                .inc();
            (StatusCode::INTERNAL_SERVER_ERROR, Json(empty_array())).into_response()
        }
    }
}

/// Accept a testimonial submission.
pub async fn create_testimonial<S: TestimonialStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let client_id = resolve_client_id(&headers);

    let rate_result = state.limiter.check(&client_id).await;
    state
        .metrics
        .tracked_clients
        .set(state.limiter.len().await as i64);

    let remaining = match rate_result {
        RateLimitResult::Allowed { remaining, .. } => {
            state
                .metrics
                .rate_limit_decisions
                .with_label_values(&["admitted"])
                .inc();
            remaining
        }
        RateLimitResult::Limited { retry_after_secs } => {
            state
                .metrics
                .rate_limit_decisions
                .with_label_values(&["rejected"])
                .inc();
            info!(client = %client_id, retry_after_secs, "Submission rate limited");
            return Err(AppError::RateLimited { retry_after_secs });
        }
    };

    let submission = state.validator.parse_and_validate(&body).map_err(|err| {
        state
            .metrics
            .validation_failures
            .with_label_values(&[err.kind()])
            .inc();
        info!(client = %client_id, kind = err.kind(), "Submission rejected");
        err
    })?;

    let record = Testimonial::from_submission(submission, client_id.as_str(), Utc::now());
    let created = state.store.create(record).await.map_err(|err| {
        error!(client = %client_id, error = %err, "Failed to persist testimonial");
        state
            .metrics
            .store_failures
            .with_label_values(&["create"])
            .inc();
        err
    })?;

    state.metrics.testimonials_created.inc();
    info!(client = %client_id, remaining, "Testimonial created");

    Ok((
        StatusCode::CREATED,
        [
            ("x-ratelimit-limit", state.limiter.max_requests().to_string()),
            ("x-ratelimit-remaining", remaining.to_string()),
        ],
        Json(safe_json(&created)),
    )
        .into_response())
}

/// Prometheus metrics endpoint.
pub async fn render_metrics<S: TestimonialStore>(State(state): State<Arc<AppState<S>>>) -> Response {
    match state.metrics.render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Convert a value to plain JSON data, or `[]` if it will not serialize.
pub fn safe_json<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_string(value)
        .and_then(|text| serde_json::from_str(&text))
        .unwrap_or_else(|err| {
            warn!(error = %err, "Response is not serializable, returning empty array");
            empty_array()
        })
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}
