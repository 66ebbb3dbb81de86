//! Error types for presigned URL signing and verification.

/// Errors raised while signing or verifying a presigned URL.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The requested lifespan is outside the 1 second to 7 day window SigV4 allows.
    #[error("presigned URL expiry must be between 1 and 604800 seconds, got {0}s")]
    InvalidExpiry(u64),

    /// The URL could not be parsed or lacks a host.
    #[error("invalid presigned URL: {0}")]
    InvalidUrl(String),

    /// The signing algorithm is not `AWS4-HMAC-SHA256`.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// `X-Amz-Credential` is not `AKID/date/region/service/aws4_request`.
    #[error("Invalid credential format")]
    InvalidCredential,

    /// The access key ID is unknown to the credential provider.
    #[error("Access key not found: {0}")]
    AccessKeyNotFound(String),

    /// The computed signature does not match the one in the URL.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,

    /// `X-Amz-Date + X-Amz-Expires` lies in the past.
    #[error("Request has expired")]
    RequestExpired,

    /// A required `X-Amz-*` query parameter is absent or malformed.
    #[error("Missing required query parameter: {0}")]
    MissingQueryParam(String),
}
