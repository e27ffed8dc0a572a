//! The per-resource freshness record.

use axum::http::header::{CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_TYPE};
use axum::http::response::Parts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What was last written for one resource location.
///
/// One logical record per location, last write wins. Written by the
/// freshness middleware right after a successful non-conditional GET or PUT
/// body is fully rendered; read by the conditional-request evaluator on
/// later requests to the same location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationMetadata {
    /// Exact canonical URI the response was served for. No normalization
    /// beyond what the request carried.
    pub location: String,

    /// Content-Type of the rendered representation.
    pub media_type: Option<String>,

    /// Content-Language, when negotiated.
    pub language: Option<String>,

    /// Content-Encoding values, in application order. Empty when the
    /// response was not encoded.
    pub encodings: Vec<String>,

    /// Wall-clock capture time (UTC), not a domain timestamp.
    pub last_modified: DateTime<Utc>,

    /// Opaque hash of the rendered bytes, already quoted for the ETag
    /// header.
    pub entity_tag: String,
}

impl RepresentationMetadata {
    /// Assemble a record from the response head plus the computed tag.
    pub fn from_response_parts(
        location: impl Into<String>,
        parts: &Parts,
        entity_tag: String,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let header_str = |name| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let encodings = parts
            .headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(',')
                    .map(|enc| enc.trim().to_string())
                    .filter(|enc| !enc.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            location: location.into(),
            media_type: header_str(CONTENT_TYPE),
            language: header_str(CONTENT_LANGUAGE),
            encodings,
            last_modified,
            entity_tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Response;

    #[test]
    fn test_from_response_parts() {
        let response = Response::builder()
            .header(CONTENT_TYPE, "application/vnd.siren+json")
            .header(CONTENT_LANGUAGE, "en")
            .header(CONTENT_ENCODING, "gzip, br")
            .body(Body::empty())
            .unwrap();
        let (parts, _) = response.into_parts();

        let meta = RepresentationMetadata::from_response_parts(
            "/targets/123",
            &parts,
            "\"abc\"".into(),
            Utc::now(),
        );
        assert_eq!(meta.media_type.as_deref(), Some("application/vnd.siren+json"));
        assert_eq!(meta.language.as_deref(), Some("en"));
        assert_eq!(meta.encodings, vec!["gzip", "br"]);
        assert_eq!(meta.entity_tag, "\"abc\"");
    }

    #[test]
    fn test_missing_headers_leave_fields_empty() {
        let response = Response::builder().body(Body::empty()).unwrap();
        let (parts, _) = response.into_parts();
        let meta = RepresentationMetadata::from_response_parts(
            "/targets/123",
            &parts,
            "\"abc\"".into(),
            Utc::now(),
        );
        assert!(meta.media_type.is_none());
        assert!(meta.encodings.is_empty());
    }
}
