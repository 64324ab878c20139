// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for abuse simulation against the testimonial write path.

pub mod attacks;
pub mod generators;
pub mod metrics;
