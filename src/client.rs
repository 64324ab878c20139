// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identifier resolution from proxy headers.

use axum::http::HeaderMap;

/// Identifier used when no proxy header names the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Headers consulted in priority order.
const CLIENT_HEADERS: &[&str] = &["x-forwarded-for", "x-real-ip", "x-vercel-forwarded-for"];

/// Resolve the identifier that keys rate limiting for a request.
///
/// Takes the first non-empty value among the forwarding headers; for a
/// comma-separated list only the first (client-most) hop counts.
pub fn resolve_client_id(headers: &HeaderMap) -> String {
    CLIENT_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(|value| value.split(',').next().unwrap_or_default().trim())
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_first_hop() {
        let map = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(resolve_client_id(&map), "203.0.113.7");
    }

    #[test]
    fn test_priority_fallthrough() {
        let map = headers(&[("x-forwarded-for", ""), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(resolve_client_id(&map), "198.51.100.2");

        let map = headers(&[("x-vercel-forwarded-for", "192.0.2.9")]);
        assert_eq!(resolve_client_id(&map), "192.0.2.9");
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(resolve_client_id(&HeaderMap::new()), UNKNOWN_CLIENT);
        assert_eq!(
            resolve_client_id(&headers(&[("x-forwarded-for", " , ")])),
            UNKNOWN_CLIENT
        );
    }
}
