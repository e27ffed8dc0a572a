//! Conditional-request evaluation (If-None-Match / If-Match).
//!
//! Reads the freshness metadata the write path recorded and short-circuits:
//! a GET whose If-None-Match matches the stored tag becomes a 304 before the
//! handler runs; a PUT whose If-Match does not match becomes a 412. This
//! layer sits outside the freshness recorder, so its 304/412 responses pass
//! that recorder untouched.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use courier_conditional::{http_date, FreshnessState, MetadataStore, RepresentationMetadata};

pub async fn evaluate_preconditions(
    State(store): State<FreshnessState>,
    request: Request,
    next: Next,
) -> Response {
    let location = request.uri().to_string();
    let method = request.method();

    if method == Method::GET || method == Method::HEAD {
        let if_none_match = request
            .headers()
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok());
        if let Some(condition) = if_none_match {
            if let Some(meta) = store.get(&location) {
                if etag_matches(condition, &meta.entity_tag) {
                    return not_modified(&meta);
                }
            }
        }
    } else if method == Method::PUT {
        let if_match = request
            .headers()
            .get(header::IF_MATCH)
            .and_then(|v| v.to_str().ok());
        if let Some(condition) = if_match {
            let matched = store
                .get(&location)
                .map(|meta| etag_matches(condition, &meta.entity_tag))
                .unwrap_or(false);
            if !matched {
                return StatusCode::PRECONDITION_FAILED.into_response();
            }
        }
    }

    next.run(request).await
}

/// Compare a comma-separated condition list against the stored tag. `*`
/// matches any stored representation; weak prefixes are ignored for the
/// comparison.
fn etag_matches(condition: &str, entity_tag: &str) -> bool {
    condition
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == entity_tag)
}

/// 304 carrying the validators the stored record knows about.
fn not_modified(meta: &RepresentationMetadata) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    if let Ok(etag) = HeaderValue::from_str(&meta.entity_tag) {
        response.headers_mut().insert(header::ETAG, etag);
    }
    if let Ok(last_modified) = HeaderValue::from_str(&http_date(meta.last_modified)) {
        response
            .headers_mut()
            .insert(header::LAST_MODIFIED, last_modified);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_matches_exact_and_star() {
        assert!(etag_matches("\"abc\"", "\"abc\""));
        assert!(etag_matches("*", "\"abc\""));
        assert!(etag_matches("\"x\", \"abc\"", "\"abc\""));
        assert!(etag_matches("W/\"abc\"", "\"abc\""));
        assert!(!etag_matches("\"x\"", "\"abc\""));
    }
}
