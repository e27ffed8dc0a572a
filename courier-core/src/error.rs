//! Domain error taxonomy shared by the stores and the HTTP layer.

use crate::models::ResourceKind;

/// Errors surfaced by domain operations.
///
/// `NotFound` and `Validation` map to fixed client-visible statuses; anything
/// else collapses into `Internal` and is reported as a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found(ResourceKind::Target, "123");
        assert_eq!(err.to_string(), "target 123 not found");
        assert!(err.is_not_found());
    }
}
