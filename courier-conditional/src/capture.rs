//! Response body capture.
//!
//! Buffers the fully rendered body so the same bytes can be hashed and then
//! re-emitted to the client verbatim. The original response head travels
//! with the error so the caller can always restore a deliverable response,
//! even when the body stream fails mid-capture.

use axum::body::{to_bytes, Body, Bytes};
use axum::http::response::Parts;
use axum::response::Response;

/// Body collection failed (typically a disconnected client). Carries the
/// response head so the caller can still complete the exchange.
#[derive(Debug)]
pub struct CaptureError {
    pub parts: Parts,
    pub source: axum::Error,
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "response capture failed: {}", self.source)
    }
}

impl std::error::Error for CaptureError {}

/// A fully materialized response: head plus the exact body bytes.
#[derive(Debug)]
pub struct CapturedResponse {
    pub parts: Parts,
    pub bytes: Bytes,
}

impl CapturedResponse {
    /// Reassemble the response the client will receive. The bytes are the
    /// ones that were hashed; nothing is re-serialized.
    pub fn into_response(self) -> Response {
        Response::from_parts(self.parts, Body::from(self.bytes))
    }
}

/// Drive the body to completion and buffer it.
pub async fn capture(response: Response) -> Result<CapturedResponse, CaptureError> {
    let (parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => Ok(CapturedResponse { parts, bytes }),
        Err(source) => Err(CaptureError { parts, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_capture_roundtrips_bytes() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .body(Body::from(r#"{"uuid":"123"}"#))
            .unwrap();

        let captured = capture(response).await.unwrap();
        assert_eq!(&captured.bytes[..], br#"{"uuid":"123"}"#);

        let restored = captured.into_response();
        assert_eq!(restored.status(), StatusCode::OK);
        let body = to_bytes(restored.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"uuid":"123"}"#);
    }

    #[tokio::test]
    async fn test_capture_failure_keeps_parts() {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("stream broke")),
        ];
        let failing = Body::from_stream(futures::stream::iter(chunks));
        let response = Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .body(failing)
            .unwrap();
        let err = capture(response).await.unwrap_err();
        assert_eq!(err.parts.status, StatusCode::OK);
        assert!(err.parts.headers.contains_key("content-type"));
    }
}
