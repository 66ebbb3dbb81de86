//! S3 object store adapter.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::{ByteStream, DateTime as SmithyDateTime};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use recipe_vault_core::{ObjectMetadata, ObjectStore, ObjectVersion, StoreError};
use tracing::{debug, warn};

/// [`ObjectStore`] backed by an S3 bucket with versioning enabled.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Wrap an S3 client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> Result<Option<String>, StoreError> {
        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::request("PutObject", DisplayErrorContext(&e)))?;

        Ok(output.version_id().map(ToOwned::to_owned))
    }

    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
    ) -> Result<ObjectMetadata, StoreError> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .version_id(version_id)
            .send()
            .await
        {
            Ok(output) => Ok(ObjectMetadata {
                version_id: output.version_id().map(ToOwned::to_owned),
                content_length: output
                    .content_length()
                    .and_then(|n| u64::try_from(n).ok())
                    .unwrap_or_default(),
                last_modified: output.last_modified().and_then(to_chrono),
            }),
            Err(err) if is_missing_version(&err) => {
                debug!(bucket, key, version_id, "object version not found");
                Err(StoreError::NotFound {
                    key: key.to_owned(),
                    version_id: version_id.to_owned(),
                })
            }
            Err(err) => Err(StoreError::request("HeadObject", DisplayErrorContext(&err))),
        }
    }

    async fn list_versions(
        &self,
        bucket: &str,
        key_prefix: &str,
    ) -> Result<Vec<ObjectVersion>, StoreError> {
        let mut versions = Vec::new();
        let mut key_marker: Option<String> = None;
        let mut version_id_marker: Option<String> = None;

        loop {
            let page = self
                .client
                .list_object_versions()
                .bucket(bucket)
                .prefix(key_prefix)
                .set_key_marker(key_marker.take())
                .set_version_id_marker(version_id_marker.take())
                .send()
                .await
                .map_err(|e| StoreError::request("ListObjectVersions", DisplayErrorContext(&e)))?;

            for entry in page.versions() {
                let (Some(key), Some(version_id), Some(last_modified)) = (
                    entry.key(),
                    entry.version_id(),
                    entry.last_modified().and_then(to_chrono),
                ) else {
                    warn!(?entry, "skipping incomplete version entry");
                    continue;
                };
                versions.push(ObjectVersion {
                    key: key.to_owned(),
                    version_id: version_id.to_owned(),
                    last_modified,
                });
            }

            if page.is_truncated() != Some(true) {
                break;
            }
            key_marker = page.next_key_marker().map(ToOwned::to_owned);
            version_id_marker = page.next_version_id_marker().map(ToOwned::to_owned);
            if key_marker.is_none() && version_id_marker.is_none() {
                warn!(bucket, "truncated listing without continuation markers");
                break;
            }
        }

        Ok(versions)
    }

    async fn presign_get_url(
        &self,
        bucket: &str,
        key: &str,
        version_id: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError> {
        // X-Amz-Expires is whole seconds; a sub-second lifespan would sign as 0.
        if expires_in.as_secs() == 0 {
            return Err(StoreError::Signing(format!(
                "lifespan {expires_in:?} is shorter than one second"
            )));
        }
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StoreError::Signing(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .version_id(version_id)
            .presigned(presigning)
            .await
            .map_err(|e| StoreError::Signing(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_owned())
    }
}

/// A probe for a version that never existed or was pruned comes back as
/// 404, or as 400 when the version ID is not even well-formed.
fn is_missing_version(err: &SdkError<HeadObjectError>) -> bool {
    if err
        .as_service_error()
        .is_some_and(HeadObjectError::is_not_found)
    {
        return true;
    }
    let Some(status) = err.raw_response().map(|resp| resp.status().as_u16()) else {
        return false;
    };
    if status == 400 {
        // HEAD errors carry no body, so a malformed version ID cannot be told
        // apart from a region or signing mismatch.
        warn!(
            status,
            error = %DisplayErrorContext(err),
            "HeadObject answered 400, treating it as a missing version"
        );
    }
    is_missing_version_status(status)
}

fn is_missing_version_status(status: u16) -> bool {
    matches!(status, 400 | 404)
}

fn to_chrono(timestamp: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
