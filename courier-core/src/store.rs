//! In-memory resource stores.
//!
//! Each store is a uuid-keyed BTreeMap behind a `parking_lot::RwLock`, so
//! listings iterate in a stable order and concurrent request handlers need
//! no external locking. Persistence beyond process lifetime is out of scope.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::{DomainError, Result};
use crate::models::{Audience, Notification, Page, ResourceKind, Target, Template};

/// Anything stored under its own uuid.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Notification {
    fn id(&self) -> &str {
        &self.uuid
    }
}

impl Identified for Audience {
    fn id(&self) -> &str {
        &self.uuid
    }
}

impl Identified for Target {
    fn id(&self) -> &str {
        &self.uuid
    }
}

impl Identified for Template {
    fn id(&self) -> &str {
        &self.uuid
    }
}

/// Uuid-keyed store for one resource kind.
pub struct ResourceStore<T> {
    kind: ResourceKind,
    items: RwLock<BTreeMap<String, T>>,
}

impl<T: Clone + Identified> ResourceStore<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Insert or replace, keyed by the item's own uuid. Returns true if the
    /// item was newly created.
    pub fn upsert(&self, item: T) -> bool {
        self.items
            .write()
            .insert(item.id().to_string(), item)
            .is_none()
    }

    pub fn get(&self, id: &str) -> Result<T> {
        self.items
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(self.kind, id))
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        match self.items.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(self.kind, id)),
        }
    }

    pub fn list(&self, skip: usize, take: usize) -> Page<T> {
        let items = self.items.read();
        let total = items.len();
        let page = items.values().skip(skip).take(take).cloned().collect();
        Page {
            items: page,
            skip,
            take,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// All four stores, shared across request handlers via `Arc`.
pub struct StoreHandle {
    pub notifications: ResourceStore<Notification>,
    pub audiences: ResourceStore<Audience>,
    pub targets: ResourceStore<Target>,
    pub templates: ResourceStore<Template>,
}

impl StoreHandle {
    pub fn new() -> Self {
        Self {
            notifications: ResourceStore::new(ResourceKind::Notification),
            audiences: ResourceStore::new(ResourceKind::Audience),
            targets: ResourceStore::new(ResourceKind::Target),
            templates: ResourceStore::new(ResourceKind::Template),
        }
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(uuid: &str, name: &str) -> Target {
        Target {
            uuid: uuid.into(),
            name: name.into(),
            phone_number: "+15550000000".into(),
        }
    }

    #[test]
    fn test_upsert_then_get() {
        let store = ResourceStore::new(ResourceKind::Target);
        assert!(store.upsert(target("a", "Alice")));
        assert!(!store.upsert(target("a", "Alice v2")));
        assert_eq!(store.get("a").unwrap().name, "Alice v2");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store: ResourceStore<Target> = ResourceStore::new(ResourceKind::Target);
        let err = store.get("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_pages_in_key_order() {
        let store = ResourceStore::new(ResourceKind::Target);
        store.upsert(target("c", "Carol"));
        store.upsert(target("a", "Alice"));
        store.upsert(target("b", "Bob"));

        let page = store.list(1, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].uuid, "b");
    }

    #[test]
    fn test_remove() {
        let store = ResourceStore::new(ResourceKind::Target);
        store.upsert(target("a", "Alice"));
        store.remove("a").unwrap();
        assert!(store.remove("a").is_err());
        assert!(store.is_empty());
    }
}
