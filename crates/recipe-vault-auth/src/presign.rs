//! Presigned URL generation and verification.
//!
//! A presigned URL carries these query parameters next to the request's own:
//!
//! - `X-Amz-Algorithm` - always `AWS4-HMAC-SHA256`
//! - `X-Amz-Credential` - `AKID/date/region/service/aws4_request`
//! - `X-Amz-Date` - ISO 8601 basic timestamp (`YYYYMMDDTHHMMSSZ`)
//! - `X-Amz-Expires` - validity in seconds, 1 to 604800
//! - `X-Amz-SignedHeaders` - always `host`
//! - `X-Amz-Signature` - hex-encoded signature over all of the above

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{
    SIGNED_HEADERS, build_canonical_query_string, build_canonical_uri,
    build_presigned_canonical_request, encode_query,
};
use crate::credentials::{CredentialProvider, Credentials};
use crate::error::AuthError;
use crate::signing::{
    ALGORITHM, build_string_to_sign, compute_signature, credential_scope, derive_signing_key,
};

/// Longest lifespan SigV4 accepts for a presigned URL (7 days).
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 604_800;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_FORMAT: &str = "%Y%m%d";

/// Inputs for [`presign_url`].
#[derive(Debug, Clone)]
pub struct PresignParams<'a> {
    /// HTTP method the URL authorizes.
    pub method: &'a str,
    /// `http` or `https`.
    pub scheme: &'a str,
    /// Host, including a non-default port.
    pub host: &'a str,
    /// Unencoded request path.
    pub path: &'a str,
    /// Unencoded request query parameters, e.g. `versionId`.
    pub query: &'a [(&'a str, &'a str)],
    /// Signing region.
    pub region: &'a str,
    /// Signing service name (`s3`).
    pub service: &'a str,
    /// How long the URL stays valid.
    pub expires_in: Duration,
    /// Signing instant; `X-Amz-Date`.
    pub signed_at: DateTime<Utc>,
}

/// What a successfully verified presigned URL proves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedClaims {
    /// Access key that signed the URL.
    pub access_key_id: String,
    /// Region from the credential scope.
    pub region: String,
    /// Service from the credential scope.
    pub service: String,
    /// `X-Amz-Date`.
    pub signed_at: DateTime<Utc>,
    /// `X-Amz-Expires`.
    pub expires_in: Duration,
}

impl PresignedClaims {
    /// The instant after which the URL is rejected.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.signed_at
            + chrono::Duration::from_std(self.expires_in).unwrap_or(chrono::Duration::zero())
    }
}

/// Produce a presigned URL.
///
/// # Errors
///
/// Returns [`AuthError::InvalidExpiry`] when `expires_in` is shorter than one
/// second or longer than [`MAX_PRESIGN_EXPIRY_SECS`]. No URL is produced in
/// that case.
pub fn presign_url(params: &PresignParams<'_>, credentials: &Credentials) -> Result<String, AuthError> {
    let expires = params.expires_in.as_secs();
    if expires == 0 || expires > MAX_PRESIGN_EXPIRY_SECS {
        return Err(AuthError::InvalidExpiry(expires));
    }

    let timestamp = params.signed_at.format(TIMESTAMP_FORMAT).to_string();
    let date = params.signed_at.format(DATE_FORMAT).to_string();
    let scope = credential_scope(&date, params.region, params.service);
    let credential = format!("{}/{scope}", credentials.access_key_id());
    let expires = expires.to_string();

    let mut pairs: Vec<(&str, &str)> = params.query.to_vec();
    pairs.extend([
        ("X-Amz-Algorithm", ALGORITHM),
        ("X-Amz-Credential", credential.as_str()),
        ("X-Amz-Date", timestamp.as_str()),
        ("X-Amz-Expires", expires.as_str()),
        ("X-Amz-SignedHeaders", SIGNED_HEADERS),
    ]);

    let canonical_uri = build_canonical_uri(params.path);
    let canonical_query = build_canonical_query_string(&encode_query(&pairs));
    let canonical_request = build_presigned_canonical_request(
        params.method,
        &canonical_uri,
        &canonical_query,
        params.host,
    );
    debug!(canonical_request, "built presigned canonical request");

    let string_to_sign = build_string_to_sign(&timestamp, &scope, &canonical_request);
    let signing_key = derive_signing_key(
        credentials.secret_access_key(),
        &date,
        params.region,
        params.service,
    );
    let signature = compute_signature(&signing_key, &string_to_sign);

    Ok(format!(
        "{}://{}{canonical_uri}?{canonical_query}&X-Amz-Signature={signature}",
        params.scheme, params.host
    ))
}

/// Verify a presigned URL at instant `now`.
///
/// # Errors
///
/// Returns an [`AuthError`] when the URL is malformed, expired, signed by an
/// unknown key, or its signature does not match.
pub fn verify_presigned_url(
    method: &str,
    url: &str,
    credential_provider: &dyn CredentialProvider,
    now: DateTime<Utc>,
) -> Result<PresignedClaims, AuthError> {
    let uri: http::Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| AuthError::InvalidUrl(e.to_string()))?;
    let host = uri
        .authority()
        .ok_or_else(|| AuthError::InvalidUrl(format!("missing host in {url}")))?
        .as_str();
    let query = uri.query().unwrap_or("");
    let params = parse_query(query);

    let algorithm = required(&params, "X-Amz-Algorithm")?;
    if algorithm != ALGORITHM {
        return Err(AuthError::UnsupportedAlgorithm(algorithm.to_owned()));
    }

    let credential = required(&params, "X-Amz-Credential")?;
    let cred_parts: Vec<&str> = credential.splitn(5, '/').collect();
    let [access_key_id, date, region, service, terminator] = cred_parts.as_slice() else {
        return Err(AuthError::InvalidCredential);
    };
    if *terminator != "aws4_request" {
        return Err(AuthError::InvalidCredential);
    }

    let timestamp = required(&params, "X-Amz-Date")?;
    let signed_at = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| AuthError::MissingQueryParam("X-Amz-Date (invalid format)".to_owned()))?
        .and_utc();
    let expires: u64 = required(&params, "X-Amz-Expires")?
        .parse()
        .map_err(|_| AuthError::MissingQueryParam("X-Amz-Expires (invalid integer)".to_owned()))?;
    let provided_signature = required(&params, "X-Amz-Signature")?;

    let claims = PresignedClaims {
        access_key_id: (*access_key_id).to_owned(),
        region: (*region).to_owned(),
        service: (*service).to_owned(),
        signed_at,
        expires_in: Duration::from_secs(expires),
    };
    if now > claims.expires_at() {
        return Err(AuthError::RequestExpired);
    }

    let secret_key = credential_provider.get_secret_key(access_key_id)?;

    let unsigned_query = query
        .split('&')
        .filter(|param| !param.starts_with("X-Amz-Signature="))
        .collect::<Vec<_>>()
        .join("&");
    let canonical_request = build_presigned_canonical_request(
        method,
        &build_canonical_uri(uri.path()),
        &build_canonical_query_string(&unsigned_query),
        host,
    );
    let scope = credential_scope(date, region, service);
    let string_to_sign = build_string_to_sign(timestamp, &scope, &canonical_request);
    let signing_key = derive_signing_key(&secret_key, date, region, service);
    let expected_signature = compute_signature(&signing_key, &string_to_sign);

    if provided_signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        Ok(claims)
    } else {
        debug!(
            expected = %expected_signature,
            provided = %provided_signature,
            "presigned URL signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            let value = percent_encoding::percent_decode_str(value)
                .decode_utf8_lossy()
                .into_owned();
            Some((key.to_owned(), value))
        })
        .collect()
}

fn required<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, AuthError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| AuthError::MissingQueryParam(name.to_owned()))
}
