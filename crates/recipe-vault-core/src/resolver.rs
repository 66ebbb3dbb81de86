//! Resolution of the per-request configuration values.
//!
//! Nothing is cached: each call reaches the parameter store again, so a
//! changed bucket or lifespan takes effect on the very next request.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::duration::{DurationParseError, parse_duration};
use crate::error::{ConfigError, ParameterError};
use crate::model::{BUCKET_NAME_PARAMETER, URL_LIFESPAN_PARAMETER};
use crate::ports::ParameterResolver;

/// Looks up the bucket name and the download link lifespan.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    parameters: Arc<dyn ParameterResolver>,
}

impl ConfigResolver {
    /// Wrap a parameter store.
    #[must_use]
    pub fn new(parameters: Arc<dyn ParameterResolver>) -> Self {
        Self { parameters }
    }

    /// Fetch the raw value of one parameter.
    pub async fn resolve(&self, name: &str) -> Result<String, ParameterError> {
        let value = self.parameters.get_parameter(name).await?;
        debug!(parameter = name, "resolved parameter");
        Ok(value)
    }

    /// The bucket holding every file version.
    pub async fn bucket_name(&self) -> Result<String, ConfigError> {
        Ok(self.resolve(BUCKET_NAME_PARAMETER).await?)
    }

    /// How long a download link stays valid.
    ///
    /// Links are signed with whole seconds, so anything under one second is
    /// rejected as a parse error.
    pub async fn url_lifespan(&self) -> Result<Duration, ConfigError> {
        let raw = self.resolve(URL_LIFESPAN_PARAMETER).await?;
        let parse_error = |source| ConfigError::Parse {
            name: URL_LIFESPAN_PARAMETER.to_owned(),
            source,
        };

        let lifespan = parse_duration(raw.trim()).map_err(parse_error)?;
        if lifespan.as_secs() == 0 {
            return Err(parse_error(DurationParseError::Invalid(raw)));
        }
        Ok(lifespan)
    }
}
