//! Upload handler.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::info;

use crate::error::FileApiError;
use crate::model::FILE_NAME;
use crate::provider::{FileApi, respond};
use crate::response::{ResponseEnvelope, build_response};

impl FileApi {
    /// Store a new revision of the file.
    ///
    /// `body` is the base64-encoded file content. Answers 201 with an empty
    /// body, 400 when the body is absent or empty, and 500 when it is not
    /// valid base64 or the store rejects the write.
    pub async fn handle_upload(&self, body: Option<&str>) -> ResponseEnvelope {
        respond(self.upload(body).await)
    }

    async fn upload(&self, body: Option<&str>) -> Result<ResponseEnvelope, FileApiError> {
        let encoded = body
            .filter(|b| !b.is_empty())
            .ok_or_else(|| FileApiError::InvalidInput("No request body supplied!".to_owned()))?;
        let data = STANDARD.decode(encoded).map_err(FileApiError::Decode)?;

        let bucket = self.config.bucket_name().await?;
        let size = data.len();
        let version_id = self
            .store
            .put_object(&bucket, FILE_NAME, Bytes::from(data))
            .await?;

        info!(
            bucket = %bucket,
            key = FILE_NAME,
            size,
            version_id = version_id.as_deref().unwrap_or("null"),
            "uploaded file"
        );
        Ok(build_response("", 201, None))
    }
}
