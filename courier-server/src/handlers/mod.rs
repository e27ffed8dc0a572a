//! Resource handlers: one module per resource kind, all following the same
//! negotiate → load → represent shape.

pub mod audiences;
pub mod notifications;
pub mod targets;
pub mod templates;

use axum::http::Uri;
use serde::Deserialize;

use courier_hypermedia::RenderContext;

use crate::negotiate::Negotiated;

/// skip/take paging parameters. `take` falls back to the configured default
/// page size.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: usize,

    pub take: Option<usize>,
}

pub(crate) fn context(uri: &Uri, negotiated: &Negotiated) -> RenderContext {
    RenderContext::new(uri.clone()).with_language(negotiated.language.clone())
}
