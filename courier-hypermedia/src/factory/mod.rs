//! Representation factories, one per output format.
//!
//! A factory is a pure function family from `(RenderContext, domain value)`
//! to a [`Representation`] tagged with the factory's own media type. The
//! JSON/XML/YAML formats share one property-document implementation
//! ([`DocumentFactory`]); Siren gets its own graph-building implementation
//! ([`SirenFactory`]).

pub mod document;
pub mod siren;

use axum::http::Uri;
use serde::Serialize;
use serde_json::{Map, Value};

use courier_core::{Audience, Notification, Page, Target, Template};

use crate::media::MediaType;
use crate::representation::Representation;

pub use document::DocumentFactory;
pub use siren::SirenFactory;

/// Per-request rendering inputs: the canonical resource location and the
/// negotiated content language.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub location: Uri,
    pub language: Option<String>,
}

impl RenderContext {
    pub fn new(location: Uri) -> Self {
        Self {
            location,
            language: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

/// A domain failure ready for rendering: the fixed status it maps to plus a
/// client-safe message.
#[derive(Debug, Clone, Serialize)]
pub struct FaultReport {
    pub status: u16,
    pub message: String,
}

impl FaultReport {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: 404,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
        }
    }
}

/// One representation builder per domain entity kind, plus the error path.
///
/// Implementations are pure: no hidden state, never failing for valid domain
/// input. A malformed individual link is omitted locally, never propagated.
pub trait RepresentationFactory: Send + Sync + std::fmt::Debug {
    fn media_type(&self) -> MediaType;

    fn notification(&self, ctx: &RenderContext, notification: &Notification) -> Representation;
    fn notifications(&self, ctx: &RenderContext, page: &Page<Notification>) -> Representation;

    fn audience(&self, ctx: &RenderContext, audience: &Audience) -> Representation;
    fn audiences(&self, ctx: &RenderContext, page: &Page<Audience>) -> Representation;

    fn target(&self, ctx: &RenderContext, target: &Target) -> Representation;
    fn targets(&self, ctx: &RenderContext, page: &Page<Target>) -> Representation;

    fn template(&self, ctx: &RenderContext, template: &Template) -> Representation;
    fn templates(&self, ctx: &RenderContext, page: &Page<Template>) -> Representation;

    fn error(&self, ctx: &RenderContext, fault: &FaultReport) -> Representation;
}

/// Project a domain value into an ordered property map. Field order follows
/// the struct declaration (serde_json preserves insertion order).
pub(crate) fn project<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Project one page of items into `{items, skip, take, total}`.
pub(crate) fn project_page<T: Serialize>(page: &Page<T>) -> Map<String, Value> {
    let items: Vec<Value> = page
        .items
        .iter()
        .map(|item| Value::Object(project(item)))
        .collect();
    let mut map = Map::new();
    map.insert("items".into(), Value::Array(items));
    map.insert("skip".into(), Value::from(page.skip));
    map.insert("take".into(), Value::from(page.take));
    map.insert("total".into(), Value::from(page.total));
    map
}

/// Rebuild `base` with a different path, preserving scheme and authority.
/// `None` when the path does not parse (fail-closed link policy).
pub(crate) fn rewrite_path(base: &Uri, path: &str) -> Option<Uri> {
    let mut parts = base.clone().into_parts();
    parts.path_and_query = Some(path.parse().ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_preserves_declaration_order() {
        let target = Target {
            uuid: "123".into(),
            name: "Alice".into(),
            phone_number: "+15551234567".into(),
        };
        let keys: Vec<_> = project(&target).keys().cloned().collect();
        assert_eq!(keys, vec!["uuid", "name", "phoneNumber"]);
    }

    #[test]
    fn test_rewrite_path_preserves_authority() {
        let base: Uri = "https://api.example.com:8443/audiences/9?skip=5"
            .parse()
            .unwrap();
        let rewritten = rewrite_path(&base, "/targets/123").unwrap();
        assert_eq!(rewritten.to_string(), "https://api.example.com:8443/targets/123");
    }

    #[test]
    fn test_rewrite_path_fails_closed() {
        let base: Uri = "https://api.example.com/audiences/9".parse().unwrap();
        assert!(rewrite_path(&base, "/targets/b d").is_none());
    }

    #[test]
    fn test_rewrite_path_on_relative_base() {
        let base: Uri = "/audiences/9".parse().unwrap();
        let rewritten = rewrite_path(&base, "/targets/123").unwrap();
        assert_eq!(rewritten.to_string(), "/targets/123");
    }
}
