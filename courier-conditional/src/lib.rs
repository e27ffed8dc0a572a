//! # courier-conditional
//!
//! Conditional-caching support for courier: per-resource freshness metadata
//! (content hash, ETag, Last-Modified) recorded as responses stream out.
//!
//! The [`freshness`] middleware captures the exact serialized bytes a client
//! receives, hashes them into an opaque ETag, and persists a
//! [`RepresentationMetadata`] record keyed by the resource location. A later
//! conditional request (If-None-Match / If-Match) is evaluated against that
//! record by the HTTP layer.

pub mod capture;
pub mod digest;
pub mod freshness;
pub mod metadata;
pub mod store;

pub use digest::{entity_tag, http_date};
pub use freshness::{get_freshness, put_freshness, FreshnessState};
pub use metadata::RepresentationMetadata;
pub use store::{InMemoryMetadataStore, MetadataStore};
