//! In-memory service adapters.
//!
//! [`InMemoryParameterStore`] and [`InMemoryObjectStore`] mirror the behavior
//! of SSM Parameter Store and a versioned S3 bucket closely enough to run the
//! handlers without AWS. Download links are real SigV4 presigned URLs, so a
//! caller can check their signature and expiry with
//! [`recipe_vault_auth::verify_presigned_url`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use recipe_vault_auth::{Credentials, PresignParams, presign_url};
use tracing::debug;

use crate::error::{ParameterError, StoreError};
use crate::model::{ObjectMetadata, ObjectVersion};
use crate::ports::{ObjectStore, ParameterResolver};

/// Parameter store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: DashMap<String, String>,
}

impl InMemoryParameterStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite a parameter.
    pub fn put(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove a parameter.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values.remove(name).map(|(_, v)| v)
    }
}

#[async_trait]
impl ParameterResolver for InMemoryParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        self.values
            .get(name)
            .map(|v| v.clone())
            .ok_or_else(|| ParameterError::NotFound {
                name: name.to_owned(),
            })
    }
}

/// Where presigned URLs point and who signs them.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    /// `http` or `https`.
    pub scheme: String,
    /// Host and optional port; URLs are path-style (`host/bucket/key`).
    pub host: String,
    /// Signing region.
    pub region: String,
    /// Signing credentials.
    pub credentials: Credentials,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_owned(),
            host: "localhost:4566".to_owned(),
            region: "us-east-1".to_owned(),
            credentials: Credentials::new("test", "test"),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredVersion {
    version_id: String,
    data: Bytes,
    last_modified: DateTime<Utc>,
}

/// A versioned bucket store kept in memory.
///
/// Buckets must be created before use. Every put creates a new version;
/// listings return the newest version of each key first, like S3.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    /// bucket -> key -> versions, oldest first.
    buckets: DashMap<String, DashMap<String, Vec<StoredVersion>>>,
    signing: SigningConfig,
}

impl InMemoryObjectStore {
    /// Create a store that signs with the given configuration.
    #[must_use]
    pub fn new(signing: SigningConfig) -> Self {
        Self {
            buckets: DashMap::new(),
            signing,
        }
    }

    /// Create an empty bucket. Existing buckets are left untouched.
    pub fn create_bucket(&self, bucket: impl Into<String>) {
        self.buckets.entry(bucket.into()).or_default();
    }

    /// The signing configuration.
    #[must_use]
    pub fn signing(&self) -> &SigningConfig {
        &self.signing
    }

    /// Body of one stored version.
    #[must_use]
    pub fn object_data(&self, bucket: &str, key: &str, version_id: &str) -> Option<Bytes> {
        let objects = self.buckets.get(bucket)?;
        let versions = objects.get(key)?;
        versions
            .iter()
            .find(|v| v.version_id == version_id)
            .map(|v| v.data.clone())
    }

    fn no_such_bucket(operation: &'static str, bucket: &str) -> StoreError {
        StoreError::request(operation, format!("The specified bucket does not exist: {bucket}"))
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> Result<Option<String>, StoreError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket("PutObject", bucket))?;

        let version_id = uuid::Uuid::new_v4().simple().to_string();
        objects.entry(key.to_owned()).or_default().push(StoredVersion {
            version_id: version_id.clone(),
            data: body,
            last_modified: Utc::now(),
        });
        debug!(bucket, key, version_id, "stored object version");

        Ok(Some(version_id))
    }

    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
    ) -> Result<ObjectMetadata, StoreError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket("HeadObject", bucket))?;

        objects
            .get(key)
            .and_then(|versions| {
                versions
                    .iter()
                    .find(|v| v.version_id == version_id)
                    .map(|v| ObjectMetadata {
                        version_id: Some(v.version_id.clone()),
                        content_length: v.data.len() as u64,
                        last_modified: Some(v.last_modified),
                    })
            })
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_owned(),
                version_id: version_id.to_owned(),
            })
    }

    async fn list_versions(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectVersion>, StoreError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket("ListObjectVersions", bucket))?;

        let mut keys: Vec<String> = objects
            .iter()
            .filter(|entry| entry.key().starts_with(key_prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();

        let mut listing = Vec::new();
        for key in keys {
            if let Some(versions) = objects.get(&key) {
                listing.extend(versions.iter().rev().map(|v| ObjectVersion {
                    key: key.clone(),
                    version_id: v.version_id.clone(),
                    last_modified: v.last_modified,
                }));
            }
        }
        Ok(listing)
    }

    async fn presign_get_url(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError> {
        let path = format!("/{bucket}/{key}");
        let params = PresignParams {
            method: "GET",
            scheme: &self.signing.scheme,
            host: &self.signing.host,
            path: &path,
            query: &[("versionId", version_id)],
            region: &self.signing.region,
            service: "s3",
            expires_in,
            signed_at: Utc::now(),
        };
        presign_url(&params, &self.signing.credentials)
            .map_err(|e| StoreError::Signing(e.to_string()))
    }
}
