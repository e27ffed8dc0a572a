//! Siren hypermedia entity model.
//!
//! An [`Entity`] is a tree: classes, properties, links, actions, and embedded
//! sub-entities (full entities or lightweight link stubs). Links and embedded
//! links validate their href at construction and fail closed: a value that
//! does not parse as a URI is omitted from the graph rather than corrupting
//! the representation.
//!
//! Builders here are single-use and value-returning; there is no reset step
//! to forget.

use axum::http::{Method, Uri};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::media::MediaType;

/// Input control types clients use to render action fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Tel,
    Number,
    Hidden,
    Url,
    Date,
}

/// One input field of an [`Action`]. Field order within an action is
/// significant and preserved.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: None,
            field_type,
        }
    }

    pub fn titled(name: impl Into<String>, title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: Some(title.into()),
            field_type,
        }
    }
}

/// A state-transition affordance: name, method, target href, consumed media
/// type, and an ordered field list.
#[derive(Debug, Clone)]
pub struct Action {
    pub name: String,
    pub title: Option<String>,
    pub method: Method,
    pub href: String,
    pub media_type: Option<MediaType>,
    pub fields: Vec<Field>,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut len = 3;
        if self.title.is_some() {
            len += 1;
        }
        if self.media_type.is_some() {
            len += 1;
        }
        if !self.fields.is_empty() {
            len += 1;
        }
        let mut s = serializer.serialize_struct("Action", len)?;
        s.serialize_field("name", &self.name)?;
        if let Some(title) = &self.title {
            s.serialize_field("title", title)?;
        }
        s.serialize_field("method", self.method.as_str())?;
        s.serialize_field("href", &self.href)?;
        if let Some(mt) = &self.media_type {
            s.serialize_field("type", mt.as_str())?;
        }
        if !self.fields.is_empty() {
            s.serialize_field("fields", &self.fields)?;
        }
        s.end()
    }
}

impl Action {
    /// Start an action aimed at an already-validated location.
    pub fn builder(name: impl Into<String>, method: Method, href: &Uri) -> ActionBuilder {
        ActionBuilder {
            action: Action {
                name: name.into(),
                title: None,
                method,
                href: href.to_string(),
                media_type: None,
                fields: Vec::new(),
            },
        }
    }
}

/// Single-use builder for [`Action`].
pub struct ActionBuilder {
    action: Action,
}

impl ActionBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.action.title = Some(title.into());
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.action.media_type = Some(media_type);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.action.fields.push(field);
        self
    }

    pub fn build(self) -> Action {
        self.action
    }
}

/// A relation + href pair. Construction validates the href.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub rel: Vec<String>,
    pub href: String,
}

impl Link {
    /// `None` if `href` is not a syntactically valid URI.
    pub fn new<I, S>(rel: I, href: &str) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _: Uri = href.parse().ok()?;
        Some(Self {
            rel: rel.into_iter().map(Into::into).collect(),
            href: href.to_string(),
        })
    }

    /// Build from an already-parsed URI; cannot fail.
    pub fn from_uri<I, S>(rel: I, href: &Uri) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rel: rel.into_iter().map(Into::into).collect(),
            href: href.to_string(),
        }
    }
}

/// A lightweight sub-entity stub: relation + href plus class/title context.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedLink {
    #[serde(rename = "class", skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    pub rel: Vec<String>,

    pub href: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EmbeddedLink {
    /// `None` if `href` is not a syntactically valid URI.
    pub fn new(
        classes: Vec<String>,
        rel: Vec<String>,
        href: &str,
        title: Option<String>,
    ) -> Option<Self> {
        let _: Uri = href.parse().ok()?;
        Some(Self {
            classes,
            rel,
            href: href.to_string(),
            title,
        })
    }
}

/// A fully embedded child entity, carrying its relation to the parent.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddedEntity {
    pub rel: Vec<String>,

    #[serde(flatten)]
    pub entity: Entity,
}

/// Child node of an entity: a full entity or an embedded-link stub.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SubEntity {
    Link(EmbeddedLink),
    Entity(Box<EmbeddedEntity>),
}

/// Root or embedded hypermedia node.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    #[serde(rename = "class", skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    #[serde(rename = "entities", skip_serializing_if = "Vec::is_empty")]
    pub sub_entities: Vec<SubEntity>,
}

impl Entity {
    pub fn builder() -> EntityBuilder {
        EntityBuilder {
            entity: Entity {
                classes: Vec::new(),
                title: None,
                properties: Map::new(),
                actions: Vec::new(),
                links: Vec::new(),
                sub_entities: Vec::new(),
            },
        }
    }

    /// Sub-entities carrying the given relation.
    pub fn sub_entities_with_rel(&self, rel: &str) -> Vec<&SubEntity> {
        self.sub_entities
            .iter()
            .filter(|s| match s {
                SubEntity::Link(l) => l.rel.iter().any(|r| r == rel),
                SubEntity::Entity(e) => e.rel.iter().any(|r| r == rel),
            })
            .collect()
    }
}

/// Single-use builder for [`Entity`].
///
/// `link` and `embedded_link` fail closed: an href that does not parse is
/// dropped with a debug log and construction continues.
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.entity.classes.push(class.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.entity.title = Some(title.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.entity.properties.insert(name.into(), value);
        self
    }

    pub fn properties(mut self, properties: Map<String, Value>) -> Self {
        self.entity.properties.extend(properties);
        self
    }

    /// Add a link, dropping it if the href is not a valid URI.
    pub fn link<I, S>(mut self, rel: I, href: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match Link::new(rel, href) {
            Some(link) => self.entity.links.push(link),
            None => debug!(href, "dropping link with invalid href"),
        }
        self
    }

    /// Add a link from an already-validated URI.
    pub fn link_uri<I, S>(mut self, rel: I, href: &Uri) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entity.links.push(Link::from_uri(rel, href));
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.entity.actions.push(action);
        self
    }

    /// Add an embedded-link sub-entity, dropping it if the href is invalid.
    /// A single bad member never fails the parent.
    pub fn embedded_link(
        mut self,
        classes: Vec<String>,
        rel: Vec<String>,
        href: &str,
        title: Option<String>,
    ) -> Self {
        match EmbeddedLink::new(classes, rel, href, title) {
            Some(link) => self.entity.sub_entities.push(SubEntity::Link(link)),
            None => debug!(href, "dropping sub-entity with invalid href"),
        }
        self
    }

    pub fn embedded_entity(mut self, rel: Vec<String>, entity: Entity) -> Self {
        self.entity
            .sub_entities
            .push(SubEntity::Entity(Box::new(EmbeddedEntity { rel, entity })));
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }
}
