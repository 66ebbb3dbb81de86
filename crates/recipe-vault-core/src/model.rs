//! Domain types and fixed names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single object key under which every revision is stored.
pub const FILE_NAME: &str = "recipes.pdf";

/// Parameter-store path holding the bucket name.
pub const BUCKET_NAME_PARAMETER: &str = "/recipe-api-processor/s3/name";

/// Parameter-store path holding the download link lifespan (e.g. `15m`).
pub const URL_LIFESPAN_PARAMETER: &str = "/recipe-api-processor/s3/url-duration";

/// Render format of [`FileRecord::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One stored revision as returned by the list handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Opaque version identifier assigned by the store.
    pub version: String,
    /// Last-modified time in UTC, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    /// Always [`FILE_NAME`].
    pub name: String,
}

impl From<&ObjectVersion> for FileRecord {
    fn from(version: &ObjectVersion) -> Self {
        Self {
            version: version.version_id.clone(),
            date: version.last_modified.format(DATE_FORMAT).to_string(),
            name: FILE_NAME.to_owned(),
        }
    }
}

/// One entry of a version listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectVersion {
    /// Object key.
    pub key: String,
    /// Version identifier.
    pub version_id: String,
    /// When this version was written.
    pub last_modified: DateTime<Utc>,
}

/// Result of a metadata probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// Version identifier, when the store reports one.
    pub version_id: Option<String>,
    /// Object size in bytes.
    pub content_length: u64,
    /// When this version was written.
    pub last_modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_should_render_record_from_version() {
        let version = ObjectVersion {
            key: FILE_NAME.to_owned(),
            version_id: "abc123".to_owned(),
            last_modified: Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
        };
        let record = FileRecord::from(&version);
        assert_eq!(record.version, "abc123");
        assert_eq!(record.date, "2024-03-09 07:05:01");
        assert_eq!(record.name, FILE_NAME);
    }

    #[test]
    fn test_should_serialize_record_fields() {
        let record = FileRecord {
            version: "v".to_owned(),
            date: "2024-01-01 00:00:00".to_owned(),
            name: FILE_NAME.to_owned(),
        };
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["version"], "v");
        assert_eq!(json["date"], "2024-01-01 00:00:00");
        assert_eq!(json["name"], FILE_NAME);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
