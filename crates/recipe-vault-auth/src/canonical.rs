//! Canonical request construction for SigV4 query-string signing.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! host:<host>\n\n
//! host\n
//! UNSIGNED-PAYLOAD
//! ```
//!
//! Presigned URLs only ever sign the `host` header and never sign the payload.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Payload hash used by every presigned request.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// The only header a presigned URL signs.
pub const SIGNED_HEADERS: &str = "host";

/// Everything except the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`).
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment or query component.
///
/// ```
/// use recipe_vault_auth::canonical::uri_encode;
///
/// assert_eq!(uri_encode("a/b c"), "a%2Fb%20c");
/// ```
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Encode each path segment, keeping the `/` separators.
///
/// Segments are decoded first so an already-encoded path is not encoded twice.
///
/// ```
/// use recipe_vault_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("/bucket/my file.pdf"), "/bucket/my%20file.pdf");
/// assert_eq!(build_canonical_uri(""), "/");
/// ```
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_owned();
    }

    path.split('/')
        .map(|segment| uri_encode(&percent_decode_str(segment).decode_utf8_lossy()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Sort an already-encoded query string by key, then by value.
///
/// Values are kept exactly as they appear; the signer encodes them once when
/// the URL is built and the verifier must hash the same bytes.
#[must_use]
pub fn build_canonical_query_string(query: &str) -> String {
    let mut params: Vec<(&str, &str)> = query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| param.split_once('=').unwrap_or((param, "")))
        .collect();

    params.sort_unstable();

    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encode raw (key, value) pairs into a query string, in the given order.
#[must_use]
pub fn encode_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical request for a presigned URL.
#[must_use]
pub fn build_presigned_canonical_request(
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    host: &str,
) -> String {
    format!(
        "{method}\n{canonical_uri}\n{canonical_query}\nhost:{}\n\n{SIGNED_HEADERS}\n{UNSIGNED_PAYLOAD}",
        host.trim()
    )
}
