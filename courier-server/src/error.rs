//! Error-to-representation translation.
//!
//! Domain failures are rendered through the same registry/factory path as
//! successful responses, in the client's negotiated media type, with a fixed
//! status per failure class: not-found → 404, validation → 400, anything
//! else → 500. A negotiation failure itself is a plain-text 406 (there is no
//! factory to render with).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use courier_core::DomainError;
use courier_hypermedia::{
    FaultReport, MediaType, NegotiationError, Registry, RenderContext, Representation,
};

use crate::respond::RepresentationResponse;

/// A failed request, carrying an already-built error representation when one
/// could be negotiated.
pub struct ApiError {
    status: StatusCode,
    representation: Option<Representation>,
    message: String,
}

impl ApiError {
    pub fn not_acceptable(err: NegotiationError) -> Self {
        Self {
            status: StatusCode::NOT_ACCEPTABLE,
            representation: None,
            message: err.to_string(),
        }
    }

    /// Resolve a domain failure to the client's negotiated media type.
    /// Falls back to plain text when negotiation fails too.
    pub fn domain(
        registry: &Registry,
        ctx: &RenderContext,
        candidates: &[MediaType],
        err: DomainError,
    ) -> Self {
        let (status, fault) = match &err {
            DomainError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, FaultReport::not_found(err.to_string()))
            }
            DomainError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                FaultReport {
                    status: 400,
                    message: err.to_string(),
                },
            ),
            DomainError::Internal(_) => {
                warn!(error = %err, "internal failure surfaced to client");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    FaultReport::internal("internal error"),
                )
            }
        };
        let representation = registry
            .lookup(candidates)
            .ok()
            .map(|factory| factory.error(ctx, &fault));
        Self {
            status,
            representation,
            message: fault.message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.representation {
            Some(rep) => {
                let mut response = RepresentationResponse(rep).into_response();
                *response.status_mut() = self.status;
                response
            }
            None => (self.status, self.message).into_response(),
        }
    }
}
