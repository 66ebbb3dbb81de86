//! List handler.

use tracing::{debug, info};

use crate::error::FileApiError;
use crate::model::{FILE_NAME, FileRecord};
use crate::provider::{FileApi, respond};
use crate::response::{ResponseEnvelope, build_response};

impl FileApi {
    /// List every stored revision as a JSON array of [`FileRecord`].
    ///
    /// Records are ordered newest first; revisions written in the same
    /// instant keep the order the store reported. An empty bucket yields `[]`.
    pub async fn handle_list(&self) -> ResponseEnvelope {
        respond(self.list().await)
    }

    async fn list(&self) -> Result<ResponseEnvelope, FileApiError> {
        let bucket = self.config.bucket_name().await?;
        let mut versions = self.store.list_versions(&bucket, FILE_NAME).await?;

        // The listing is prefix-based; `recipes.pdf.bak` would match too.
        let listed = versions.len();
        versions.retain(|v| v.key == FILE_NAME);
        if versions.len() != listed {
            debug!(dropped = listed - versions.len(), "ignored keys sharing the file name prefix");
        }
        versions.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        let records: Vec<FileRecord> = versions.iter().map(FileRecord::from).collect();
        let body = serde_json::to_string(&records)
            .map_err(|e| FileApiError::Upstream(format!("failed to serialize file list: {e}")))?;

        info!(bucket = %bucket, count = records.len(), "listed file versions");
        Ok(build_response(body, 200, None))
    }
}
