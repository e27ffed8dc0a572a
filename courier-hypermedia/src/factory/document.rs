//! Property-document factory covering JSON, XML, and the YAML aliases.

use courier_core::{Audience, Notification, Page, Target, Template};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::media::MediaType;
use crate::representation::Representation;

use super::{project, project_page, FaultReport, RenderContext, RepresentationFactory};

/// Renders domain state as a flat property document in whichever non-Siren
/// media type it was constructed for. One instance per registered type, so a
/// YAML alias keeps its exact tag.
#[derive(Debug)]
pub struct DocumentFactory {
    media_type: MediaType,
}

impl DocumentFactory {
    pub fn new(media_type: MediaType) -> Self {
        debug_assert!(media_type != MediaType::Siren, "Siren has its own factory");
        Self { media_type }
    }

    fn document(
        &self,
        ctx: &RenderContext,
        root: &str,
        fields: Map<String, Value>,
    ) -> Representation {
        Representation::builder(self.media_type, &ctx.location)
            .maybe_language(ctx.language.clone())
            .properties(root, fields)
            .build()
    }

    fn item<T: Serialize>(&self, ctx: &RenderContext, root: &str, value: &T) -> Representation {
        self.document(ctx, root, project(value))
    }

    fn page<T: Serialize>(
        &self,
        ctx: &RenderContext,
        root: &str,
        page: &Page<T>,
    ) -> Representation {
        self.document(ctx, root, project_page(page))
    }
}

impl RepresentationFactory for DocumentFactory {
    fn media_type(&self) -> MediaType {
        self.media_type
    }

    fn notification(&self, ctx: &RenderContext, notification: &Notification) -> Representation {
        self.item(ctx, "notification", notification)
    }

    fn notifications(&self, ctx: &RenderContext, page: &Page<Notification>) -> Representation {
        self.page(ctx, "notifications", page)
    }

    fn audience(&self, ctx: &RenderContext, audience: &Audience) -> Representation {
        self.item(ctx, "audience", audience)
    }

    fn audiences(&self, ctx: &RenderContext, page: &Page<Audience>) -> Representation {
        self.page(ctx, "audiences", page)
    }

    fn target(&self, ctx: &RenderContext, target: &Target) -> Representation {
        self.item(ctx, "target", target)
    }

    fn targets(&self, ctx: &RenderContext, page: &Page<Target>) -> Representation {
        self.page(ctx, "targets", page)
    }

    fn template(&self, ctx: &RenderContext, template: &Template) -> Representation {
        self.item(ctx, "template", template)
    }

    fn templates(&self, ctx: &RenderContext, page: &Page<Template>) -> Representation {
        self.page(ctx, "templates", page)
    }

    fn error(&self, ctx: &RenderContext, fault: &FaultReport) -> Representation {
        self.item(ctx, "error", fault)
    }
}
