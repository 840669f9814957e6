//! Target-URL construction and the redirect-following loop.
//!
//! # Responsibilities
//! - Overlay the inbound query string onto the fixed upstream URL
//! - Issue outbound attempts with redirects disabled
//! - Follow 3xx responses manually, bounded by `max_redirects`
//! - Apply per-code method semantics (303 downgrades to GET)
//!
//! # Design Decisions
//! - Iterative loop with an explicit depth counter, not recursion; the
//!   bound check is a loop invariant
//! - The terminal upstream status is not propagated to the caller; any
//!   non-redirect response resolves to its body alone

use bytes::Bytes;
use reqwest::{header, Client, Method, StatusCode};
use url::Url;

use crate::config::RelayConfig;
use crate::relay::error::RelayError;

/// Fixed content type on every outbound attempt. The upstream accepts raw
/// text/JSON payloads; the inbound content type is not negotiated.
const OUTBOUND_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Statuses the relay follows when a `Location` header is present.
fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

fn overlay(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => pairs.push((key, value)),
    }
}

/// Build the outbound target from the upstream URL and the inbound query.
///
/// The upstream's own query pairs are kept; inbound pairs are overlaid
/// key by key with the inbound value winning on collision. A repeated key
/// collapses to its last occurrence. The inbound path is ignored.
pub fn build_target_url(upstream: &Url, inbound_query: Option<&str>) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (key, value) in upstream.query_pairs() {
        overlay(&mut pairs, key.into_owned(), value.into_owned());
    }
    if let Some(query) = inbound_query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            overlay(&mut pairs, key.into_owned(), value.into_owned());
        }
    }

    let mut target = upstream.clone();
    if pairs.is_empty() {
        target.set_query(None);
    } else {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.extend_pairs(pairs.iter());
        target.set_query(Some(&query.finish()));
    }
    target
}

/// Resolve one buffered inbound request against the upstream, following
/// redirects up to `config.max_redirects` hops.
///
/// Returns the final response body. Transport failures and the redirect
/// bound abort immediately; no attempt is retried.
pub async fn resolve(
    client: &Client,
    config: &RelayConfig,
    mut method: Method,
    mut target: Url,
    body: Bytes,
) -> Result<Bytes, RelayError> {
    let mut depth: u32 = 0;

    loop {
        let mut request = client
            .request(method.clone(), target.clone())
            .header(header::CONTENT_TYPE, OUTBOUND_CONTENT_TYPE);
        if method != Method::GET {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();

        tracing::debug!(
            method = %method,
            target = %target,
            depth,
            status = %status,
            "Upstream hop"
        );

        let location = if is_redirect(status) {
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        } else {
            None
        };

        // A redirect status without a Location header is terminal.
        let Some(location) = location else {
            return Ok(response.bytes().await?);
        };

        // Bound check happens before following, so at most
        // max_redirects + 1 outbound requests are ever made.
        if depth + 1 > config.max_redirects {
            tracing::warn!(limit = config.max_redirects, target = %target, "Redirect limit exceeded");
            return Err(RelayError::TooManyRedirects {
                limit: config.max_redirects,
            });
        }

        // Relative locations resolve against the attempt just made.
        target = target.join(&location)?;
        if status == StatusCode::SEE_OTHER {
            // 303 always downgrades; GET carries no body.
            method = Method::GET;
        }
        depth += 1;
    }
}
