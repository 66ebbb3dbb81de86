//! AWS Signature Version 4 presigned URLs.
//!
//! Presigned URLs carry their authorization in the query string, so anyone
//! holding the URL can fetch the object until `X-Amz-Date + X-Amz-Expires`
//! passes. This crate produces such URLs for the in-memory object store and
//! verifies them again, which lets tests check both the signature and the
//! embedded lifespan without a live S3 endpoint.
//!
//! # Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use recipe_vault_auth::{Credentials, PresignParams, presign_url};
//!
//! let credentials = Credentials::new("AKIDEXAMPLE", "secret");
//! let params = PresignParams {
//!     method: "GET",
//!     scheme: "http",
//!     host: "localhost:4566",
//!     path: "/bucket/recipes.pdf",
//!     query: &[("versionId", "v1")],
//!     region: "us-east-1",
//!     service: "s3",
//!     expires_in: Duration::from_secs(900),
//!     signed_at: chrono::Utc::now(),
//! };
//! let url = presign_url(&params, &credentials).unwrap();
//! assert!(url.contains("X-Amz-Expires=900"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction
//! - [`credentials`] - Signing credentials and lookup for verification
//! - [`error`] - Signing and verification errors
//! - [`presign`] - Presigned URL generation and verification
//! - [`signing`] - Key derivation and HMAC-SHA256 signatures

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod presign;
pub mod signing;

pub use credentials::{CredentialProvider, Credentials, StaticCredentialProvider};
pub use error::AuthError;
pub use presign::{MAX_PRESIGN_EXPIRY_SECS, PresignParams, PresignedClaims, presign_url, verify_presigned_url};
