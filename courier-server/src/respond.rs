//! Turning a `Representation` into an HTTP response.

use axum::body::Body;
use axum::http::header::{CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use courier_hypermedia::Representation;

/// A rendered representation with its Content-Type (and Content-Language /
/// Content-Encoding when the representation carries them).
pub struct RepresentationResponse(pub Representation);

impl IntoResponse for RepresentationResponse {
    fn into_response(self) -> Response {
        let rep = self.0;
        let bytes = match rep.render() {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(location = rep.location(), error = %err, "representation rendering failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, "rendering failed").into_response();
            }
        };

        let mut response = Response::new(Body::from(bytes));
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(rep.media_type().as_str()),
        );
        if let Some(language) = rep.language() {
            if let Ok(value) = HeaderValue::from_str(language) {
                response.headers_mut().insert(CONTENT_LANGUAGE, value);
            }
        }
        if let Some(encoding) = rep.encoding() {
            if let Ok(value) = HeaderValue::from_str(encoding) {
                response.headers_mut().insert(CONTENT_ENCODING, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;
    use courier_hypermedia::{Entity, MediaType};

    #[test]
    fn test_sets_content_headers() {
        let location: Uri = "/targets/1".parse().unwrap();
        let rep = Representation::builder(MediaType::Siren, &location)
            .language("en")
            .entity(Entity::builder().class("target").build())
            .build();
        let response = RepresentationResponse(rep).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/vnd.siren+json"
        );
        assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "en");
    }
}
