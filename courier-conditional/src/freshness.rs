//! Write-time freshness recording middleware.
//!
//! Two instances wrap the response path, differing only in the methods they
//! act on and the conditional status that bypasses them: the GET-path
//! (GET/HEAD, bypassed by 304) and the PUT-path (PUT, bypassed by 412).
//!
//! Per response the order is fixed: guard checks, then body capture, then
//! hashing, then metadata persistence and header injection. Recording is
//! best-effort: any capture failure is logged and the response still
//! completes, just without fresh caching headers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing::{debug, warn};

use crate::capture::capture;
use crate::digest::{entity_tag, http_date};
use crate::metadata::RepresentationMetadata;
use crate::store::MetadataStore;

/// Injected store handle; no ambient lookup.
pub type FreshnessState = Arc<dyn MetadataStore>;

#[derive(Debug, Clone, Copy)]
enum WritePath {
    Get,
    Put,
}

impl WritePath {
    fn expects(self, method: &Method) -> bool {
        match self {
            WritePath::Get => method == Method::GET || method == Method::HEAD,
            WritePath::Put => method == Method::PUT,
        }
    }

    /// Status meaning the request was already satisfied via conditional
    /// semantics; nothing to record.
    fn bypass_status(self) -> StatusCode {
        match self {
            WritePath::Get => StatusCode::NOT_MODIFIED,
            WritePath::Put => StatusCode::PRECONDITION_FAILED,
        }
    }
}

/// GET/HEAD freshness recorder.
pub async fn get_freshness(
    State(store): State<FreshnessState>,
    request: Request,
    next: Next,
) -> Response {
    record(WritePath::Get, store, request, next).await
}

/// PUT freshness recorder.
pub async fn put_freshness(
    State(store): State<FreshnessState>,
    request: Request,
    next: Next,
) -> Response {
    record(WritePath::Put, store, request, next).await
}

async fn record(
    path: WritePath,
    store: FreshnessState,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let location = request.uri().to_string();
    let response = next.run(request).await;

    // Guards, in order; first match passes the body through untouched.
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return response;
    }
    if status == path.bypass_status() {
        return response;
    }
    if !path.expects(&method) {
        return response;
    }

    let captured = match capture(response).await {
        Ok(captured) => captured,
        Err(err) => {
            warn!(%location, error = %err, "body capture failed; skipping freshness record");
            // Restore a deliverable response from the preserved head.
            return Response::from_parts(err.parts, Body::empty());
        }
    };

    let tag = entity_tag(&captured.bytes);
    let now = Utc::now();
    store.put(RepresentationMetadata::from_response_parts(
        &location,
        &captured.parts,
        tag.clone(),
        now,
    ));
    debug!(%location, etag = %tag, "recorded freshness metadata");

    let mut response = captured.into_response();
    match (
        HeaderValue::from_str(&tag),
        HeaderValue::from_str(&http_date(now)),
    ) {
        (Ok(etag), Ok(last_modified)) => {
            let headers = response.headers_mut();
            headers.insert(header::ETAG, etag);
            headers.insert(header::LAST_MODIFIED, last_modified);
        }
        _ => warn!(%location, "caching header encoding failed; response sent without them"),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryMetadataStore;
    use axum::body::to_bytes;
    use axum::middleware::from_fn_with_state;
    use axum::routing::{get, put};
    use axum::Router;
    use tower::ServiceExt;

    fn store() -> Arc<InMemoryMetadataStore> {
        Arc::new(InMemoryMetadataStore::new())
    }

    fn get_app(store: Arc<InMemoryMetadataStore>) -> Router {
        let state: FreshnessState = store;
        Router::new()
            .route("/targets/{uuid}", get(|| async { r#"{"uuid":"1"}"# }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "gone") }),
            )
            .route(
                "/cached",
                get(|| async { StatusCode::NOT_MODIFIED }),
            )
            .layer(from_fn_with_state(state, get_freshness))
    }

    async fn send(app: Router, request: Request) -> Response {
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_successful_get_records_metadata_and_headers() {
        let store = store();
        let app = get_app(store.clone());
        let request = Request::builder()
            .uri("/targets/1")
            .body(Body::empty())
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let etag = response.headers().get(header::ETAG).unwrap().clone();
        assert!(response.headers().contains_key(header::LAST_MODIFIED));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"uuid":"1"}"#);

        let meta = store.get("/targets/1").unwrap();
        assert_eq!(meta.entity_tag.as_str(), etag.to_str().unwrap());
        assert_eq!(meta.entity_tag, entity_tag(br#"{"uuid":"1"}"#));
    }

    #[tokio::test]
    async fn test_error_status_passes_through() {
        let store = store();
        let app = get_app(store.clone());
        let request = Request::builder()
            .uri("/missing")
            .body(Body::empty())
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains_key(header::ETAG));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_not_modified_passes_through() {
        let store = store();
        let app = get_app(store.clone());
        let request = Request::builder()
            .uri("/cached")
            .body(Body::empty())
            .unwrap();

        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert!(!response.headers().contains_key(header::ETAG));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_path_ignores_get() {
        let store = store();
        let state: FreshnessState = store.clone();
        let app = Router::new()
            .route("/targets/{uuid}", get(|| async { "body" }))
            .layer(from_fn_with_state(state, put_freshness));

        let request = Request::builder()
            .uri("/targets/1")
            .body(Body::empty())
            .unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::ETAG));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_path_records_on_replace() {
        let store = store();
        let state: FreshnessState = store.clone();
        let app = Router::new()
            .route("/targets/{uuid}", put(|| async { r#"{"uuid":"1"}"# }))
            .layer(from_fn_with_state(state, put_freshness));

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/targets/1")
            .body(Body::empty())
            .unwrap();
        let response = send(app, request).await;
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_precondition_failed_never_persists() {
        let store = store();
        let state: FreshnessState = store.clone();
        let app = Router::new()
            .route(
                "/targets/{uuid}",
                put(|| async { StatusCode::PRECONDITION_FAILED }),
            )
            .layer(from_fn_with_state(state, put_freshness));

        let request = Request::builder()
            .method(Method::PUT)
            .uri("/targets/1")
            .body(Body::empty())
            .unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_same_body_same_tag_different_body_different_tag() {
        let store = store();
        let app = get_app(store.clone());

        for _ in 0..2 {
            let request = Request::builder()
                .uri("/targets/1")
                .body(Body::empty())
                .unwrap();
            send(app.clone(), request).await;
        }
        let first = store.get("/targets/1").unwrap().entity_tag;
        assert_eq!(first, entity_tag(br#"{"uuid":"1"}"#));

        // A different rendered body must produce a different tag.
        assert_ne!(first, entity_tag(br#"{"uuid":"2"}"#));
    }
}
