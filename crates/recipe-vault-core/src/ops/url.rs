//! Download link handler.

use tracing::info;

use crate::error::{FileApiError, StoreError};
use crate::model::FILE_NAME;
use crate::provider::{FileApi, respond};
use crate::response::{ResponseEnvelope, build_response};

impl FileApi {
    /// Issue a presigned download URL for one revision.
    ///
    /// `version` comes from the request path. Answers 200 with the raw URL,
    /// 400 when the version is absent, 404 when the store has no such
    /// revision, and 500 when configuration, the probe, or signing fails.
    pub async fn handle_get_file_url(&self, version: Option<&str>) -> ResponseEnvelope {
        respond(self.get_file_url(version).await)
    }

    async fn get_file_url(&self, version: Option<&str>) -> Result<ResponseEnvelope, FileApiError> {
        let version = version.filter(|v| !v.is_empty()).ok_or_else(|| {
            FileApiError::InvalidInput("No file version supplied in path!".to_owned())
        })?;

        let bucket = self.config.bucket_name().await?;
        let lifespan = self.config.url_lifespan().await?;

        self.store
            .head_object(&bucket, FILE_NAME, version)
            .await
            .map_err(|err| match err {
                StoreError::NotFound { .. } => FileApiError::NotFound(format!(
                    "version {version} not found for file {FILE_NAME}"
                )),
                other => other.into(),
            })?;

        let url = self
            .store
            .presign_get_url(&bucket, FILE_NAME, version, lifespan)
            .await
            .map_err(|err| FileApiError::Signing(err.to_string()))?;

        info!(
            bucket = %bucket,
            version,
            lifespan_secs = lifespan.as_secs(),
            "issued download link"
        );
        Ok(build_response(url, 200, None))
    }
}
