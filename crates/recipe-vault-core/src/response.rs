//! Uniform response construction.
//!
//! Every handler answers through [`build_response`]:
//!
//! - `status_code >= 300` wraps the body as `{"message": body, "status": code}`.
//! - otherwise the body passes through untouched.
//!
//! Headers start from [`BASELINE_HEADERS`], copied fresh for each response,
//! and caller-supplied headers replace baseline entries of the same name.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{error, warn};

use crate::error::FileApiError;

/// Multi-value header map: header name to ordered values.
pub type HeaderMap = BTreeMap<String, Vec<String>>;

/// Headers attached to every response unless the caller overrides them.
pub const BASELINE_HEADERS: [(&str, &str); 7] = [
    ("Cache-Control", "no-store"),
    ("Content-Security-Policy", "frame-ancestors 'none'"),
    ("Strict-Transport-Security", "max-age=31536000; includeSubDomains"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "DENY"),
    ("Referrer-Policy", "no-referrer"),
    ("Permissions-Policy", ""),
];

/// A handler response, independent of the transport that delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// Raw payload, or the JSON error object for `status_code >= 300`.
    pub body: String,
    /// HTTP status code.
    pub status_code: u16,
    /// Multi-value headers.
    pub headers: HeaderMap,
}

impl ResponseEnvelope {
    /// Values of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// Whether the body carries the error envelope.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status_code >= 300
    }
}

impl From<FileApiError> for ResponseEnvelope {
    fn from(err: FileApiError) -> Self {
        let status = err.status_code();
        if err.is_client_error() {
            warn!(status, error = %err, "request rejected");
        } else {
            error!(status, error = %err, "request failed");
        }
        build_response(err.to_string(), status, None)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    status: u16,
}

/// Build a response envelope.
///
/// # Examples
///
/// ```
/// use recipe_vault_core::response::build_response;
///
/// let ok = build_response("hello", 200, None);
/// assert_eq!(ok.body, "hello");
///
/// let err = build_response("boom", 500, None);
/// assert_eq!(err.body, r#"{"message":"boom","status":500}"#);
/// assert_eq!(err.header("cache-control").unwrap(), ["no-store"]);
/// ```
pub fn build_response(
    body: impl Into<String>,
    status_code: u16,
    headers: Option<&HeaderMap>,
) -> ResponseEnvelope {
    let body = body.into();
    let body = if status_code >= 300 {
        error_body(&body, status_code)
    } else {
        body
    };

    ResponseEnvelope {
        body,
        status_code,
        headers: merge_headers(headers),
    }
}

fn error_body(message: &str, status: u16) -> String {
    // A struct of a string and an integer always serializes.
    serde_json::to_string(&ErrorBody { message, status }).unwrap_or_default()
}

/// Copy the baseline and apply `overrides` on top of the copy.
///
/// An override replaces any baseline entry whose name matches ignoring case.
fn merge_headers(overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut headers: HeaderMap = BASELINE_HEADERS
        .iter()
        .map(|(name, value)| ((*name).to_owned(), vec![(*value).to_owned()]))
        .collect();

    for (name, values) in overrides.into_iter().flatten() {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        headers.insert(name.clone(), values.clone());
    }

    headers
}
