//! Accept-header negotiation.
//!
//! Produces the quality-ordered media-type candidate list the registry
//! expects, plus the negotiated content language. Unknown media types are
//! simply absent from the list; if nothing remains, the registry lookup
//! fails and the request is answered with 406.

use std::cmp::Reverse;
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT, ACCEPT_LANGUAGE};
use axum::http::request::Parts;

use courier_hypermedia::MediaType;

/// Negotiated media-type candidates (quality-ordered) and language.
#[derive(Debug, Clone)]
pub struct Negotiated {
    pub media_types: Vec<MediaType>,
    pub language: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for Negotiated {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let accept = parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
        let language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(first_language);
        Ok(Negotiated {
            media_types: parse_accept(accept),
            language,
        })
    }
}

/// Parse an Accept header into known media types ordered by q-value
/// (descending), ties broken by header position. An absent or empty header,
/// or a `*/*` entry, contributes JSON as the default candidate.
pub fn parse_accept(header: Option<&str>) -> Vec<MediaType> {
    let raw = match header {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return vec![MediaType::Json],
    };

    let mut scored: Vec<(MediaType, Reverse<u32>, usize)> = Vec::new();
    for (position, part) in raw.split(',').enumerate() {
        let quality = parse_quality(part);
        if quality == 0 {
            continue;
        }
        let essence = part.split(';').next().unwrap_or("").trim();
        let media_type = match essence {
            "*/*" => Some(MediaType::Json),
            _ => MediaType::parse(essence),
        };
        if let Some(mt) = media_type {
            scored.push((mt, Reverse(quality), position));
        }
    }

    scored.sort_by_key(|&(_, quality, position)| (quality, position));

    let mut ordered = Vec::new();
    for (mt, _, _) in scored {
        if !ordered.contains(&mt) {
            ordered.push(mt);
        }
    }
    ordered
}

/// q-value in thousandths; missing or unparsable parameters count as 1.0.
fn parse_quality(part: &str) -> u32 {
    for param in part.split(';').skip(1) {
        let mut kv = param.splitn(2, '=');
        let key = kv.next().unwrap_or("").trim();
        if key.eq_ignore_ascii_case("q") {
            let value = kv.next().unwrap_or("").trim();
            return value
                .parse::<f32>()
                .map(|q| (q.clamp(0.0, 1.0) * 1000.0) as u32)
                .unwrap_or(1000);
        }
    }
    1000
}

fn first_language(header: &str) -> Option<String> {
    let first = header.split(',').next()?.split(';').next()?.trim();
    if first.is_empty() || first == "*" {
        None
    } else {
        Some(first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_accept_defaults_to_json() {
        assert_eq!(parse_accept(None), vec![MediaType::Json]);
        assert_eq!(parse_accept(Some("  ")), vec![MediaType::Json]);
    }

    #[test]
    fn test_wildcard_is_json() {
        assert_eq!(parse_accept(Some("*/*")), vec![MediaType::Json]);
    }

    #[test]
    fn test_quality_ordering() {
        let ordered = parse_accept(Some(
            "application/xml;q=0.5, application/vnd.siren+json, application/json;q=0.8",
        ));
        assert_eq!(
            ordered,
            vec![MediaType::Siren, MediaType::Json, MediaType::Xml]
        );
    }

    #[test]
    fn test_unknown_types_are_dropped() {
        assert_eq!(parse_accept(Some("text/html")), Vec::<MediaType>::new());
        assert_eq!(
            parse_accept(Some("text/html, text/vnd.yaml")),
            vec![MediaType::VndYaml]
        );
    }

    #[test]
    fn test_zero_quality_is_dropped() {
        assert_eq!(
            parse_accept(Some("application/json;q=0, application/xml")),
            vec![MediaType::Xml]
        );
    }

    #[test]
    fn test_tie_breaks_by_position() {
        let ordered = parse_accept(Some("application/x-yaml, text/x-yaml"));
        assert_eq!(ordered, vec![MediaType::ApplicationYaml, MediaType::TextYaml]);
    }

    #[test]
    fn test_first_language() {
        assert_eq!(first_language("en-US,en;q=0.5"), Some("en-US".into()));
        assert_eq!(first_language("*"), None);
    }
}
