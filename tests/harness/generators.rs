// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for abuse simulation.

use axum::http::{HeaderMap, HeaderValue};
use serde_json::json;

/// Generate a pool of client addresses in the 10.x.x.x private range.
pub fn generate_ips(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("10.{}.{}.{}", (i >> 16) & 0xFF, (i >> 8) & 0xFF, i & 0xFF))
        .collect()
}

/// Proxy headers naming `ip`, using the header selected by `index`.
pub fn proxy_headers(ip: &str, index: usize) -> HeaderMap {
    const NAMES: &[&str] = &["x-forwarded-for", "x-real-ip", "x-vercel-forwarded-for"];

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(ip) {
        headers.insert(NAMES[index % NAMES.len()], value);
    }
    headers
}

/// A well-formed submission body.
pub fn valid_body(index: usize) -> Vec<u8> {
    json!({
        "name": format!("Visitor {index}"),
        "role": "Founder",
        "comment": "Delivered on time and communicated clearly.",
    })
    .to_string()
    .into_bytes()
}

/// Bodies a spammer might send, all of which must be rejected.
pub fn invalid_bodies() -> Vec<Vec<u8>> {
    vec![
        b"".to_vec(),
        b"{".to_vec(),
        b"name=spam&comment=spam".to_vec(),
        b"null".to_vec(),
        json!({}).to_string().into_bytes(),
        json!({"name": "   ", "comment": "spam"}).to_string().into_bytes(),
        json!({"name": "spam", "comment": ""}).to_string().into_bytes(),
        json!({"name": ["spam"], "comment": {"spam": 1}})
            .to_string()
            .into_bytes(),
    ]
}

/// Image values that must never be stored verbatim.
pub fn hostile_images() -> Vec<&'static str> {
    vec![
        "https://evil.example/tracker.png",
        "http://127.0.0.1/admin",
        "//evil.example/x.png",
        "javascript:alert(1)",
        "data:text/html;base64,PHNjcmlwdD4=",
        "DATA:IMAGE/png;base64,AAAA",
        " data:image/png;base64,AAAA",
        "/etc/passwd",
    ]
}
