//! SDK client construction.

use aws_config::{BehaviorVersion, SdkConfig};
use recipe_vault_core::VaultConfig;
use tracing::info;

/// Load the shared SDK configuration from the environment.
///
/// Region and credentials come from the standard AWS provider chain (the
/// Lambda execution role in production). `config.endpoint_url`, when set,
/// points every client at that endpoint instead of AWS.
pub async fn load_sdk_config(config: &VaultConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(endpoint) = &config.endpoint_url {
        info!(endpoint = %endpoint, "using endpoint override");
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

/// Build the S3 client, applying the path-style setting.
#[must_use]
pub fn s3_client(sdk_config: &SdkConfig, config: &VaultConfig) -> aws_sdk_s3::Client {
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(config.s3_force_path_style)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Build the SSM client.
#[must_use]
pub fn ssm_client(sdk_config: &SdkConfig) -> aws_sdk_ssm::Client {
    aws_sdk_ssm::Client::new(sdk_config)
}
