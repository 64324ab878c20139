// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Testimonial data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated submission, ready to be stamped and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialSubmission {
    pub name: String,
    pub role: Option<String>,
    pub comment: String,
    pub image: String,
}

/// A persisted testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: String,
    pub role: Option<String>,
    pub comment: String,
    pub image: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
    /// Client identifier the submission came from
    pub ip: String,
}

impl Testimonial {
    /// Stamp a submission with its origin and creation time.
    pub fn from_submission(
        submission: TestimonialSubmission,
        ip: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: submission.name,
            role: submission.role,
            comment: submission.comment,
            image: submission.image,
            created_at,
            ip: ip.into(),
        }
    }
}

/// A testimonial as shown in public listings, without the submitter's
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTestimonial {
    pub name: String,
    pub role: Option<String>,
    pub comment: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for PublicTestimonial {
    fn from(testimonial: Testimonial) -> Self {
        Self {
            name: testimonial.name,
            role: testimonial.role,
            comment: testimonial.comment,
            image: testimonial.image,
            created_at: testimonial.created_at,
        }
    }
}

/// Ordering for testimonial listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}
