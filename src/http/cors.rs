//! Fixed permissive CORS header set.
//!
//! The relay exists to put browser-reachable CORS headers in front of an
//! upstream that has none, so the values are constants rather than
//! configuration: every response carries them, including failures and
//! preflight answers.

use axum::http::{header, HeaderMap, HeaderValue};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Attach the relay's CORS headers to a response.
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
