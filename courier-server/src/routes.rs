//! Router assembly and shared application state.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use courier_conditional::{freshness, FreshnessState, InMemoryMetadataStore};
use courier_core::StoreHandle;
use courier_hypermedia::Registry;

use crate::conditional::evaluate_preconditions;
use crate::handlers::{audiences, notifications, targets, templates};

/// Shared per-process state: resource stores, the factory registry, and the
/// freshness metadata store. All handles, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<StoreHandle>,
    pub registry: Arc<Registry>,
    pub metadata: FreshnessState,
    pub page_size: usize,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            stores: Arc::new(StoreHandle::new()),
            registry: Arc::new(Registry::with_default_factories()),
            metadata: Arc::new(InMemoryMetadataStore::new()),
            page_size,
        }
    }
}

/// Build the application router.
///
/// Layer order, outermost first: trace, precondition evaluator, PUT-path
/// freshness recorder, GET-path freshness recorder, handlers. The evaluator
/// sits outside the recorders so its 304/412 short-circuits are passed
/// through untouched.
pub fn router(state: AppState) -> Router {
    let metadata = state.metadata.clone();
    Router::new()
        .route("/healthz", get(healthz))
        .route("/notifications", get(notifications::list))
        .route(
            "/notifications/{uuid}",
            get(notifications::show)
                .put(notifications::replace)
                .delete(notifications::remove),
        )
        .route("/audiences", get(audiences::list))
        .route(
            "/audiences/{uuid}",
            get(audiences::show)
                .put(audiences::replace)
                .delete(audiences::remove),
        )
        .route("/targets", get(targets::list))
        .route(
            "/targets/{uuid}",
            get(targets::show).put(targets::replace).delete(targets::remove),
        )
        .route("/templates", get(templates::list))
        .route(
            "/templates/{uuid}",
            get(templates::show)
                .put(templates::replace)
                .delete(templates::remove),
        )
        .layer(from_fn_with_state(metadata.clone(), freshness::get_freshness))
        .layer(from_fn_with_state(metadata.clone(), freshness::put_freshness))
        .layer(from_fn_with_state(metadata, evaluate_preconditions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
