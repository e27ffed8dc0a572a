//! # courier-hypermedia
//!
//! The representation engine for courier.
//!
//! This crate turns domain state into wire representations keyed by a
//! negotiated media type: plain property documents (JSON, XML, YAML) and
//! self-describing Siren hypermedia entities with links, actions, and
//! embedded sub-entities. The [`Registry`] selects one
//! [`RepresentationFactory`] per negotiated type; factories produce
//! immutable [`Representation`] values that render to deterministic bytes.

pub mod factory;
pub mod media;
pub mod registry;
pub mod representation;
pub mod siren;

pub use factory::{FaultReport, RenderContext, RepresentationFactory};
pub use media::MediaType;
pub use registry::{NegotiationError, Registry};
pub use representation::{Payload, RenderError, Representation};
pub use siren::{Action, Entity, Field, FieldType, Link, SubEntity};
