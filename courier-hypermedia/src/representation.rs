//! The immutable `Representation` value and its renderer.

use axum::http::Uri;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};

use crate::media::MediaType;
use crate::siren::Entity;

/// Format-specific payload of a representation.
#[derive(Debug, Clone)]
pub enum Payload {
    /// An ordered property document. `root` names the XML document element;
    /// JSON and YAML render the map alone.
    Properties {
        root: String,
        fields: Map<String, Value>,
    },

    /// A Siren hypermedia graph.
    Entity(Entity),

    /// Preformatted text, emitted verbatim.
    Text(String),
}

/// Serialization failures. Factories never produce these for valid domain
/// input; they exist so the HTTP layer can turn a renderer bug into a 500
/// instead of a panic.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("xml serialization failed: {0}")]
    Xml(#[from] std::io::Error),
}

/// An immutable response body: media type tag, payload, and the
/// cross-cutting location/language/encoding fields.
///
/// Built once through [`Representation::builder`], never mutated afterwards,
/// discarded after serialization.
#[derive(Debug, Clone)]
pub struct Representation {
    media_type: MediaType,
    location: String,
    language: Option<String>,
    encoding: Option<String>,
    payload: Payload,
}

impl Representation {
    /// Start building a representation anchored at its canonical location.
    pub fn builder(media_type: MediaType, location: &Uri) -> RepresentationBuilder {
        RepresentationBuilder {
            representation: Representation {
                media_type,
                location: location.to_string(),
                language: None,
                encoding: None,
                payload: Payload::Text(String::new()),
            },
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Serialize to wire bytes. Deterministic: the same payload always
    /// renders to the same bytes, so content hashes are stable.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        match (&self.payload, self.media_type) {
            (Payload::Text(text), _) => Ok(text.clone().into_bytes()),
            (Payload::Entity(entity), _) => Ok(serde_json::to_vec(entity)?),
            (Payload::Properties { fields, .. }, MediaType::Json) => {
                Ok(serde_json::to_vec(fields)?)
            }
            (Payload::Properties { fields, .. }, mt) if mt.is_yaml() => {
                Ok(serde_yaml::to_string(fields)?.into_bytes())
            }
            (Payload::Properties { root, fields }, _) => render_xml(root, fields),
        }
    }
}

/// Single-use, value-returning builder for [`Representation`].
pub struct RepresentationBuilder {
    representation: Representation,
}

impl RepresentationBuilder {
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.representation.language = Some(language.into());
        self
    }

    pub fn maybe_language(mut self, language: Option<String>) -> Self {
        self.representation.language = language;
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.representation.encoding = Some(encoding.into());
        self
    }

    pub fn properties(mut self, root: impl Into<String>, fields: Map<String, Value>) -> Self {
        self.representation.payload = Payload::Properties {
            root: root.into(),
            fields,
        };
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.representation.payload = Payload::Entity(entity);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.representation.payload = Payload::Text(text.into());
        self
    }

    pub fn build(self) -> Representation {
        self.representation
    }
}

/// Render a property map as an XML document rooted at `root`.
///
/// Objects nest, arrays repeat an `item` element inside their field element,
/// scalars become text nodes, null becomes an empty element.
fn render_xml(root: &str, fields: &Map<String, Value>) -> Result<Vec<u8>, RenderError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(root)))?;
    for (name, value) in fields {
        write_xml_value(&mut writer, name, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    Ok(writer.into_inner())
}

fn write_xml_value(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            writer.write_event(Event::Text(BytesText::new(if *b { "true" } else { "false" })))?;
        }
        Value::Number(n) => {
            writer.write_event(Event::Text(BytesText::new(&n.to_string())))?;
        }
        Value::String(s) => {
            writer.write_event(Event::Text(BytesText::new(s)))?;
        }
        Value::Array(items) => {
            for item in items {
                write_xml_value(writer, "item", item)?;
            }
        }
        Value::Object(map) => {
            for (child, value) in map {
                write_xml_value(writer, child, value)?;
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
