//! Media-type to factory dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::factory::{DocumentFactory, RepresentationFactory, SirenFactory};
use crate::media::MediaType;

/// No registered factory matched any candidate type. Surfaced as HTTP 406.
#[derive(Debug, thiserror::Error)]
#[error("no representation factory for any of: {candidates:?}")]
pub struct NegotiationError {
    pub candidates: Vec<MediaType>,
}

/// Immutable mapping from media type to exactly one factory.
///
/// Built once at startup, then shared and read concurrently without locking.
pub struct Registry {
    factories: HashMap<MediaType, Arc<dyn RepresentationFactory>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            factories: HashMap::new(),
        }
    }

    /// Registry wired with every producible media type: Siren plus one
    /// document factory per remaining type.
    pub fn with_default_factories() -> Self {
        let mut builder = Self::builder().register(Arc::new(SirenFactory));
        for media_type in MediaType::all() {
            if media_type != MediaType::Siren {
                builder = builder.register(Arc::new(DocumentFactory::new(media_type)));
            }
        }
        builder.build()
    }

    /// Return the factory for the first registered candidate. Candidates
    /// arrive already ordered by quality/specificity; there is no fallback
    /// factory.
    pub fn lookup(
        &self,
        candidates: &[MediaType],
    ) -> Result<&dyn RepresentationFactory, NegotiationError> {
        candidates
            .iter()
            .find_map(|mt| self.factories.get(mt))
            .map(AsRef::as_ref)
            .ok_or_else(|| NegotiationError {
                candidates: candidates.to_vec(),
            })
    }

    pub fn supports(&self, media_type: MediaType) -> bool {
        self.factories.contains_key(&media_type)
    }
}

/// Configuration-time accumulator for [`Registry`].
pub struct RegistryBuilder {
    factories: HashMap<MediaType, Arc<dyn RepresentationFactory>>,
}

impl RegistryBuilder {
    /// Register a factory under its own media type. Re-registering a type
    /// replaces the earlier entry.
    pub fn register(mut self, factory: Arc<dyn RepresentationFactory>) -> Self {
        self.factories.insert(factory.media_type(), factory);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            factories: self.factories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_wins() {
        let registry = Registry::with_default_factories();
        let factory = registry
            .lookup(&[MediaType::Siren, MediaType::Json])
            .unwrap();
        assert_eq!(factory.media_type(), MediaType::Siren);
    }

    #[test]
    fn test_skips_unregistered_candidates() {
        let registry = Registry::builder()
            .register(Arc::new(DocumentFactory::new(MediaType::Json)))
            .build();
        let factory = registry
            .lookup(&[MediaType::Siren, MediaType::Json])
            .unwrap();
        assert_eq!(factory.media_type(), MediaType::Json);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let registry = Registry::builder()
            .register(Arc::new(DocumentFactory::new(MediaType::Json)))
            .build();
        let err = registry.lookup(&[MediaType::Xml]).unwrap_err();
        assert_eq!(err.candidates, vec![MediaType::Xml]);
    }

    #[test]
    fn test_default_registry_covers_all_types() {
        let registry = Registry::with_default_factories();
        for mt in MediaType::all() {
            assert!(registry.supports(mt), "{mt} should be registered");
            assert_eq!(registry.lookup(&[mt]).unwrap().media_type(), mt);
        }
    }
}
