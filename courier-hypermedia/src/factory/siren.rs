//! Siren hypermedia factory.
//!
//! Construction rules, applied uniformly to all four resource kinds:
//! every entity carries a `self` link and a `collection` link to its own
//! resource collection; mutable entities expose `delete-<kind>` and
//! `replace-<kind>` actions, the latter listing the writable properties as
//! typed fields in declaration order; collection membership is rendered as
//! embedded-link sub-entities with relation `item`, hrefs derived from the
//! current location by path rewriting. A member whose href cannot be built
//! is dropped; its siblings and the parent are unaffected.

use axum::http::{Method, Uri};
use courier_core::{Audience, Notification, Page, ResourceKind, Target, Template};
use serde::Serialize;
use tracing::debug;

use crate::media::MediaType;
use crate::representation::Representation;
use crate::siren::{Action, Entity, EntityBuilder, Field, FieldType};

use super::{project, rewrite_path, FaultReport, RenderContext, RepresentationFactory};

/// Builds `application/vnd.siren+json` representations.
#[derive(Debug)]
pub struct SirenFactory;

/// Writable properties of each resource kind, in declaration order, with the
/// display type clients use to render the input control.
fn replace_fields(kind: ResourceKind) -> Vec<Field> {
    match kind {
        ResourceKind::Notification => vec![
            Field::new("uuid", FieldType::Text),
            Field::new("audience", FieldType::Text),
            Field::new("template", FieldType::Text),
            Field::new("status", FieldType::Text),
        ],
        ResourceKind::Audience => vec![
            Field::new("uuid", FieldType::Text),
            Field::new("name", FieldType::Text),
        ],
        ResourceKind::Target => vec![
            Field::new("uuid", FieldType::Text),
            Field::new("name", FieldType::Text),
            Field::new("phoneNumber", FieldType::Tel),
        ],
        ResourceKind::Template => vec![
            Field::new("uuid", FieldType::Text),
            Field::new("name", FieldType::Text),
            Field::new("body", FieldType::Text),
        ],
    }
}

fn delete_action(kind: ResourceKind, location: &Uri) -> Action {
    Action::builder(format!("delete-{}", kind.as_str()), Method::DELETE, location)
        .title(format!("Delete {}", kind.as_str()))
        .build()
}

/// Replace consumes a plain JSON document of the writable properties.
fn replace_action(kind: ResourceKind, location: &Uri) -> Action {
    let mut builder = Action::builder(format!("replace-{}", kind.as_str()), Method::PUT, location)
        .title(format!("Replace {}", kind.as_str()))
        .media_type(MediaType::Json);
    for field in replace_fields(kind) {
        builder = builder.field(field);
    }
    builder.build()
}

impl SirenFactory {
    fn wrap(&self, ctx: &RenderContext, entity: Entity) -> Representation {
        Representation::builder(MediaType::Siren, &ctx.location)
            .maybe_language(ctx.language.clone())
            .entity(entity)
            .build()
    }

    /// Shared scaffolding for a single mutable resource: class, properties,
    /// self + collection links, delete/replace actions.
    fn item_builder<T: Serialize>(
        &self,
        ctx: &RenderContext,
        kind: ResourceKind,
        value: &T,
    ) -> EntityBuilder {
        let mut builder = Entity::builder()
            .class(kind.as_str())
            .properties(project(value))
            .link_uri(["self"], &ctx.location)
            .action(delete_action(kind, &ctx.location))
            .action(replace_action(kind, &ctx.location));
        if let Some(collection) = rewrite_path(&ctx.location, &format!("/{}", kind.path_segment()))
        {
            builder = builder.link_uri(["collection"], &collection);
        }
        builder
    }

    /// One embedded-link sub-entity per page item, relation `item`.
    fn page_builder<T>(
        &self,
        ctx: &RenderContext,
        kind: ResourceKind,
        page: &Page<T>,
        ids_and_titles: impl Iterator<Item = (String, String)>,
    ) -> Entity {
        let mut builder = Entity::builder()
            .class(kind.as_str())
            .class("collection")
            .property("skip", page.skip.into())
            .property("take", page.take.into())
            .property("total", page.total.into())
            .link_uri(["self"], &ctx.location);
        for (id, title) in ids_and_titles {
            builder = self.member_link(builder, &ctx.location, kind, &id, Some(title));
        }
        builder.build()
    }

    /// Append one member stub, dropping it when its href cannot be built.
    fn member_link(
        &self,
        builder: EntityBuilder,
        location: &Uri,
        kind: ResourceKind,
        id: &str,
        title: Option<String>,
    ) -> EntityBuilder {
        match rewrite_path(location, &format!("/{}/{}", kind.path_segment(), id)) {
            Some(href) => builder.embedded_link(
                vec![kind.as_str().to_string()],
                vec!["item".to_string()],
                &href.to_string(),
                title,
            ),
            None => {
                debug!(kind = kind.as_str(), id, "dropping member with unbuildable href");
                builder
            }
        }
    }
}

impl RepresentationFactory for SirenFactory {
    fn media_type(&self) -> MediaType {
        MediaType::Siren
    }

    fn notification(&self, ctx: &RenderContext, notification: &Notification) -> Representation {
        let mut builder = self.item_builder(ctx, ResourceKind::Notification, notification);
        // Single-valued relationships render as plain links, not sub-entities.
        if let Some(audience) = rewrite_path(
            &ctx.location,
            &format!("/audiences/{}", notification.audience),
        ) {
            builder = builder.link_uri(["audience"], &audience);
        }
        if let Some(template) = rewrite_path(
            &ctx.location,
            &format!("/templates/{}", notification.template),
        ) {
            builder = builder.link_uri(["template"], &template);
        }
        self.wrap(ctx, builder.build())
    }

    fn notifications(&self, ctx: &RenderContext, page: &Page<Notification>) -> Representation {
        let entity = self.page_builder(
            ctx,
            ResourceKind::Notification,
            page,
            page.items
                .iter()
                .map(|n| (n.uuid.clone(), n.status.as_str().to_string())),
        );
        self.wrap(ctx, entity)
    }

    fn audience(&self, ctx: &RenderContext, audience: &Audience) -> Representation {
        let mut builder = self
            .item_builder(ctx, ResourceKind::Audience, audience)
            .title(audience.name.clone());
        for member in &audience.members {
            builder = self.member_link(
                builder,
                &ctx.location,
                ResourceKind::Target,
                member,
                Some(member.clone()),
            );
        }
        self.wrap(ctx, builder.build())
    }

    fn audiences(&self, ctx: &RenderContext, page: &Page<Audience>) -> Representation {
        let entity = self.page_builder(
            ctx,
            ResourceKind::Audience,
            page,
            page.items.iter().map(|a| (a.uuid.clone(), a.name.clone())),
        );
        self.wrap(ctx, entity)
    }

    fn target(&self, ctx: &RenderContext, target: &Target) -> Representation {
        let entity = self
            .item_builder(ctx, ResourceKind::Target, target)
            .title(target.name.clone())
            .build();
        self.wrap(ctx, entity)
    }

    fn targets(&self, ctx: &RenderContext, page: &Page<Target>) -> Representation {
        let entity = self.page_builder(
            ctx,
            ResourceKind::Target,
            page,
            page.items.iter().map(|t| (t.uuid.clone(), t.name.clone())),
        );
        self.wrap(ctx, entity)
    }

    fn template(&self, ctx: &RenderContext, template: &Template) -> Representation {
        let entity = self
            .item_builder(ctx, ResourceKind::Template, template)
            .title(template.name.clone())
            .build();
        self.wrap(ctx, entity)
    }

    fn templates(&self, ctx: &RenderContext, page: &Page<Template>) -> Representation {
        let entity = self.page_builder(
            ctx,
            ResourceKind::Template,
            page,
            page.items.iter().map(|t| (t.uuid.clone(), t.name.clone())),
        );
        self.wrap(ctx, entity)
    }

    fn error(&self, ctx: &RenderContext, fault: &FaultReport) -> Representation {
        let entity = Entity::builder()
            .class("error")
            .properties(project(fault))
            .link_uri(["self"], &ctx.location)
            .build();
        self.wrap(ctx, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::Payload;
    use serde_json::json;

    fn ctx(uri: &str) -> RenderContext {
        RenderContext::new(uri.parse().unwrap())
    }

    fn entity_of(rep: &Representation) -> Entity {
        match rep.payload() {
            Payload::Entity(entity) => entity.clone(),
            other => panic!("expected entity payload, got {other:?}"),
        }
    }

    #[test]
    fn test_target_worked_example() {
        let target = Target {
            uuid: "123".into(),
            name: "Alice".into(),
            phone_number: "+15551234567".into(),
        };
        let rep = SirenFactory.target(&ctx("https://api.example.com/targets/123"), &target);
        let value = serde_json::to_value(entity_of(&rep)).unwrap();

        assert_eq!(value["class"][0], json!("target"));
        assert_eq!(value["properties"]["uuid"], json!("123"));
        assert_eq!(value["properties"]["name"], json!("Alice"));
        assert_eq!(value["properties"]["phoneNumber"], json!("+15551234567"));

        let self_link = value["links"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["rel"][0] == "self")
            .unwrap();
        assert_eq!(self_link["href"], json!("https://api.example.com/targets/123"));

        let actions = value["actions"].as_array().unwrap();
        let delete = actions.iter().find(|a| a["name"] == "delete-target").unwrap();
        assert_eq!(delete["method"], json!("DELETE"));
        assert_eq!(delete["href"], json!("https://api.example.com/targets/123"));

        let replace = actions.iter().find(|a| a["name"] == "replace-target").unwrap();
        assert_eq!(replace["method"], json!("PUT"));
        assert_eq!(replace["type"], json!("application/json"));
        let names: Vec<_> = replace["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["uuid", "name", "phoneNumber"]);
    }

    #[test]
    fn test_audience_members_become_item_sub_entities() {
        let audience = Audience {
            uuid: "9".into(),
            name: "oncall".into(),
            members: vec!["1".into(), "2".into(), "3".into()],
        };
        let rep = SirenFactory.audience(&ctx("https://api.example.com/audiences/9"), &audience);
        let entity = entity_of(&rep);
        let items = entity.sub_entities_with_rel("item");
        assert_eq!(items.len(), 3);

        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            value["entities"][1]["href"],
            json!("https://api.example.com/targets/2")
        );
        assert_eq!(value["entities"][1]["class"][0], json!("target"));
    }

    #[test]
    fn test_bad_member_href_drops_only_that_member() {
        let audience = Audience {
            uuid: "9".into(),
            name: "oncall".into(),
            members: vec!["1".into(), "b d".into(), "3".into()],
        };
        let rep = SirenFactory.audience(&ctx("https://api.example.com/audiences/9"), &audience);
        let entity = entity_of(&rep);
        assert_eq!(entity.sub_entities_with_rel("item").len(), 2);
        // Parent-level fields unaffected.
        assert_eq!(entity.classes, vec!["audience"]);
        assert_eq!(entity.title.as_deref(), Some("oncall"));
        assert!(!entity.links.is_empty());
    }

    #[test]
    fn test_collection_page_sub_entities() {
        let page = Page {
            items: vec![
                Target {
                    uuid: "1".into(),
                    name: "Alice".into(),
                    phone_number: "+15550000001".into(),
                },
                Target {
                    uuid: "2".into(),
                    name: "Bob".into(),
                    phone_number: "+15550000002".into(),
                },
            ],
            skip: 0,
            take: 25,
            total: 2,
        };
        let rep = SirenFactory.targets(&ctx("https://api.example.com/targets"), &page);
        let value = serde_json::to_value(entity_of(&rep)).unwrap();
        assert_eq!(value["class"], json!(["target", "collection"]));
        assert_eq!(value["properties"]["total"], json!(2));
        assert_eq!(value["entities"].as_array().unwrap().len(), 2);
        assert_eq!(value["entities"][0]["title"], json!("Alice"));
    }

    #[test]
    fn test_notification_links_audience_and_template() {
        let notification = Notification {
            uuid: "n1".into(),
            audience: "a1".into(),
            template: "t1".into(),
            status: Default::default(),
        };
        let rep = SirenFactory.notification(
            &ctx("https://api.example.com/notifications/n1"),
            &notification,
        );
        let entity = entity_of(&rep);
        let rels: Vec<_> = entity.links.iter().map(|l| l.rel[0].as_str()).collect();
        assert!(rels.contains(&"self"));
        assert!(rels.contains(&"audience"));
        assert!(rels.contains(&"template"));
    }

    #[test]
    fn test_error_entity() {
        let rep = SirenFactory.error(
            &ctx("https://api.example.com/targets/9"),
            &FaultReport::not_found("target 9 not found"),
        );
        let value = serde_json::to_value(entity_of(&rep)).unwrap();
        assert_eq!(value["class"], json!(["error"]));
        assert_eq!(value["properties"]["status"], json!(404));
    }
}
