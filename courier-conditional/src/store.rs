//! Metadata store: keyed by exact location, last write wins.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::metadata::RepresentationMetadata;

/// Storage seam for freshness records.
///
/// Implementations synchronize internally; the middleware calls `put`/`get`
/// from concurrent requests without external locking. Concurrent writes to
/// the same location race last-write-wins, which is acceptable because each
/// racing response already committed with its own hash.
pub trait MetadataStore: Send + Sync {
    /// Idempotent overwrite keyed by `metadata.location`.
    fn put(&self, metadata: RepresentationMetadata);

    fn get(&self, location: &str) -> Option<RepresentationMetadata>;

    /// Drop the record for a location whose resource no longer exists, so a
    /// later conditional GET cannot 304 against a deleted representation.
    fn remove(&self, location: &str);
}

/// Process-local store. No eviction; the record set is bounded by the
/// resource space.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: RwLock<HashMap<String, RepresentationMetadata>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn put(&self, metadata: RepresentationMetadata) {
        self.records
            .write()
            .insert(metadata.location.clone(), metadata);
    }

    fn get(&self, location: &str) -> Option<RepresentationMetadata> {
        self.records.read().get(location).cloned()
    }

    fn remove(&self, location: &str) {
        self.records.write().remove(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(location: &str, tag: &str) -> RepresentationMetadata {
        RepresentationMetadata {
            location: location.into(),
            media_type: Some("application/json".into()),
            language: None,
            encodings: Vec::new(),
            last_modified: Utc::now(),
            entity_tag: tag.into(),
        }
    }

    #[test]
    fn test_put_get_roundtrip() {
        let store = InMemoryMetadataStore::new();
        store.put(record("/targets/1", "\"a\""));
        assert_eq!(store.get("/targets/1").unwrap().entity_tag, "\"a\"");
        assert!(store.get("/targets/2").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let store = InMemoryMetadataStore::new();
        store.put(record("/targets/1", "\"a\""));
        store.put(record("/targets/1", "\"b\""));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("/targets/1").unwrap().entity_tag, "\"b\"");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = InMemoryMetadataStore::new();
        store.put(record("/targets/1", "\"a\""));
        store.remove("/targets/1");
        store.remove("/targets/1");
        assert!(store.get("/targets/1").is_none());
    }

    #[test]
    fn test_keys_are_exact_not_normalized() {
        let store = InMemoryMetadataStore::new();
        store.put(record("/targets/1?skip=0", "\"a\""));
        assert!(store.get("/targets/1").is_none());
        assert!(store.get("/targets/1?skip=0").is_some());
    }
}
