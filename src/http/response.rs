//! Response envelopes.
//!
//! # Responsibilities
//! - Wrap the upstream's final body as a 200 success envelope
//! - Map relay failures to the uniform 500 JSON envelope
//! - Answer OPTIONS preflight with an empty 200
//!
//! # Design Decisions
//! - Status is fixed per envelope: 200 for any terminal upstream outcome,
//!   500 for transport failures and the redirect bound
//! - CORS headers attached to every envelope without exception

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};
use bytes::Bytes;

use crate::http::cors;

/// 200 with the upstream's final body verbatim.
pub fn success(body: Bytes) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    cors::apply(response.headers_mut());
    response
}

/// 500 with `{"ok": false, "error": "<string>"}`.
pub fn failure(error: &str) -> Response<Body> {
    let payload = serde_json::json!({ "ok": false, "error": error });
    let mut response = Response::new(Body::from(payload.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    cors::apply(response.headers_mut());
    response
}

/// Empty 200 for OPTIONS preflight.
pub fn preflight() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    cors::apply(response.headers_mut());
    response
}
