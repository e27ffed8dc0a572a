//! Content hashing and HTTP-date formatting.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Hash rendered bytes into a quoted opaque ETag value.
///
/// The hash covers the exact serialized bytes the client receives, so the
/// same resource in a different media type yields a different tag.
pub fn entity_tag(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("\"{}\"", hex::encode(digest))
}

/// Format a timestamp as an IMF-fixdate for the Last-Modified header.
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
