//! SSM Parameter Store adapter.

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;
use recipe_vault_core::{ParameterError, ParameterResolver};

/// [`ParameterResolver`] backed by SSM Parameter Store.
///
/// `SecureString` parameters are decrypted on read.
#[derive(Debug, Clone)]
pub struct SsmParameterResolver {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterResolver {
    /// Wrap an SSM client.
    #[must_use]
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterResolver for SsmParameterResolver {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(GetParameterError::is_parameter_not_found)
                {
                    ParameterError::NotFound {
                        name: name.to_owned(),
                    }
                } else {
                    ParameterError::Unreachable {
                        name: name.to_owned(),
                        message: DisplayErrorContext(&err).to_string(),
                    }
                }
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(ToOwned::to_owned)
            .ok_or_else(|| ParameterError::NotFound {
                name: name.to_owned(),
            })
    }
}
