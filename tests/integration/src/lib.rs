//! Integration tests for Recipe Vault.
//!
//! These tests drive the handlers through the real S3 and SSM adapters, so
//! they need an S3 + SSM emulator (LocalStack, Rustack, ...) at
//! `localhost:4566`. They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p recipe-vault-integration -- --ignored
//! ```

use std::sync::{Arc, Once};

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::types::{BucketVersioningStatus, VersioningConfiguration};
use recipe_vault_aws::{S3ObjectStore, SsmParameterResolver};
use recipe_vault_core::FileApi;
use recipe_vault_core::model::{BUCKET_NAME_PARAMETER, URL_LIFESPAN_PARAMETER};
use tokio::sync::{Mutex, MutexGuard};

static INIT: Once = Once::new();

/// The handlers read fixed parameter paths, so fixtures take turns.
static PARAMETERS: Mutex<()> = Mutex::const_new(());

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the emulator.
fn endpoint_url() -> String {
    std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

fn credentials() -> Credentials {
    Credentials::new("test", "test", None, None, "integration-test")
}

/// Create a configured S3 client pointing at the emulator.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Create a configured SSM client pointing at the emulator.
#[must_use]
pub fn ssm_client() -> aws_sdk_ssm::Client {
    init_tracing();

    let config = aws_sdk_ssm::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_ssm::Client::from_conf(config)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket with versioning enabled and return its name.
pub async fn create_versioned_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    client
        .put_bucket_versioning()
        .bucket(&name)
        .versioning_configuration(
            VersioningConfiguration::builder()
                .status(BucketVersioningStatus::Enabled)
                .build(),
        )
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to enable versioning on {name}: {e}"));
    name
}

/// Delete every object version in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let Ok(resp) = client.list_object_versions().bucket(bucket).send().await else {
        return; // Bucket may not exist.
    };

    for version in resp.versions() {
        if let (Some(key), Some(id)) = (version.key(), version.version_id()) {
            let _ = client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .version_id(id)
                .send()
                .await;
        }
    }
    for marker in resp.delete_markers() {
        if let (Some(key), Some(id)) = (marker.key(), marker.version_id()) {
            let _ = client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .version_id(id)
                .send()
                .await;
        }
    }

    let _ = client.delete_bucket().bucket(bucket).send().await;
}

/// Write a plain string parameter, replacing any existing value.
pub async fn put_parameter(client: &aws_sdk_ssm::Client, name: &str, value: &str) {
    client
        .put_parameter()
        .name(name)
        .value(value)
        .r#type(aws_sdk_ssm::types::ParameterType::String)
        .overwrite(true)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to put parameter {name}: {e}"));
}

/// A versioned bucket plus the parameters pointing the handlers at it.
///
/// Holds the parameter lock for its lifetime; call [`VaultFixture::cleanup`]
/// at the end of the test.
#[derive(Debug)]
pub struct VaultFixture {
    /// Raw S3 client for assertions.
    pub s3: aws_sdk_s3::Client,
    /// Raw SSM client for editing parameters mid-test.
    pub ssm: aws_sdk_ssm::Client,
    /// Bucket created for this test.
    pub bucket: String,
    /// Handlers wired to the real adapters.
    pub api: FileApi,
    _guard: MutexGuard<'static, ()>,
}

impl VaultFixture {
    /// Create the bucket and publish both parameters.
    pub async fn setup(prefix: &str, lifespan: &str) -> Self {
        let guard = PARAMETERS.lock().await;
        let s3 = s3_client();
        let ssm = ssm_client();

        let bucket = create_versioned_bucket(&s3, prefix).await;
        put_parameter(&ssm, BUCKET_NAME_PARAMETER, &bucket).await;
        put_parameter(&ssm, URL_LIFESPAN_PARAMETER, lifespan).await;

        let api = FileApi::new(
            Arc::new(SsmParameterResolver::new(ssm.clone())),
            Arc::new(S3ObjectStore::new(s3.clone())),
        );

        Self {
            s3,
            ssm,
            bucket,
            api,
            _guard: guard,
        }
    }

    /// Delete the bucket and every version in it.
    pub async fn cleanup(self) {
        cleanup_bucket(&self.s3, &self.bucket).await;
    }
}

/// Parse the `message` field out of an error envelope body.
#[must_use]
pub fn error_message(body: &str) -> String {
    let json: serde_json::Value = serde_json::from_str(body).expect("error envelope");
    json["message"].as_str().expect("message field").to_owned()
}

mod test_download;
mod test_list;
mod test_upload;
