// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Testimonial submission validator.
//!
//! Turns an untrusted request body into a bounded submission:
//! - Body must be well-formed JSON
//! - `name` and `comment` are required and must be non-empty after trimming
//! - Over-length fields are truncated, not rejected
//! - Only inline `data:image/` URIs are kept as images

use crate::config::ValidationConfig;
use crate::models::TestimonialSubmission;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
///
/// The messages are returned to clients as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidPayload,

    #[error("Name and comment are required")]
    MissingField(&'static str),
}

impl ValidationError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidPayload => "invalid_payload",
            ValidationError::MissingField(_) => "missing_field",
        }
    }
}

/// Testimonial submission validator.
pub struct TestimonialValidator {
    config: ValidationConfig,
}

impl TestimonialValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Parse a raw request body as JSON.
    pub fn parse(&self, body: &[u8]) -> Result<Value, ValidationError> {
        serde_json::from_slice(body).map_err(|err| {
            debug!(error = %err, "Request body is not valid JSON");
            ValidationError::InvalidPayload
        })
    }

    /// Validate and sanitize a parsed body.
    pub fn validate(&self, body: &Value) -> Result<TestimonialSubmission, ValidationError> {
        let name = required_field(body, "name", self.config.max_name_len)?;
        let comment = required_field(body, "comment", self.config.max_comment_len)?;

        let role = coerce_to_string(body.get("role"))
            .map(|role| truncate(role.trim(), self.config.max_role_len))
            .filter(|role| !role.is_empty());

        let image = match body.get("image") {
            Some(Value::String(image)) if image.starts_with(&self.config.image_prefix) => {
                image.clone()
            }
            other => {
                if other.is_some() {
                    debug!("Replacing untrusted image with placeholder");
                }
                self.config.placeholder_image.clone()
            }
        };

        Ok(TestimonialSubmission {
            name,
            role,
            comment,
            image,
        })
    }

    /// Parse and validate a raw request body.
    pub fn parse_and_validate(&self, body: &[u8]) -> Result<TestimonialSubmission, ValidationError> {
        let parsed = self.parse(body)?;
        self.validate(&parsed)
    }
}

fn required_field(
    body: &Value,
    field: &'static str,
    max_len: usize,
) -> Result<String, ValidationError> {
    let value = coerce_to_string(body.get(field))
        .map(|value| truncate(value.trim(), max_len))
        .unwrap_or_default();

    if value.is_empty() {
        debug!(field, "Missing required field");
        return Err(ValidationError::MissingField(field));
    }
    Ok(value)
}

/// Convert a scalar JSON value to text. Falsy scalars (`null`, `false`,
/// `0`) and containers yield `None`.
fn coerce_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Keep at most `max_chars` characters.
fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
