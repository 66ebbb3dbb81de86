//! Capability traits for the two external services.
//!
//! Each service gets one trait and one concrete adapter per backend, chosen
//! when [`crate::FileApi`] is constructed. The AWS adapters live in
//! `recipe-vault-aws`; the in-memory ones in [`crate::memory`].

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{ParameterError, StoreError};
use crate::model::{ObjectMetadata, ObjectVersion};

/// Reads named configuration values from a key-value parameter store.
#[async_trait]
pub trait ParameterResolver: Send + Sync + Debug {
    /// Fetch the value stored at `name`.
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError>;
}

/// The storage operations the handlers need from a versioned bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// Overwrite `key`, creating a new version. Returns the version ID when
    /// the bucket is versioned.
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes)
    -> Result<Option<String>, StoreError>;

    /// Probe one exact version of `key`.
    ///
    /// Must return [`StoreError::NotFound`] when that version does not exist.
    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
    ) -> Result<ObjectMetadata, StoreError>;

    /// List every version of every key starting with `key_prefix`, draining
    /// all pages.
    async fn list_versions(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectVersion>, StoreError>;

    /// Produce a signed GET URL for one version, valid for `expires_in`.
    ///
    /// Must fail with [`StoreError::Signing`] rather than return a URL that
    /// does not carry the requested expiry.
    async fn presign_get_url(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError>;
}
