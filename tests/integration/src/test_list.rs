//! Listing integration tests.

#[cfg(test)]
mod tests {
    use aws_sdk_s3::primitives::ByteStream;
    use recipe_vault_core::{FILE_NAME, FileRecord};

    use crate::VaultFixture;

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_empty_bucket_as_empty_array() {
        let fx = VaultFixture::setup("list-empty", "15m").await;

        let resp = fx.api.handle_list().await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "[]");

        fx.cleanup().await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_every_revision_of_the_file() {
        let fx = VaultFixture::setup("list", "15m").await;

        let mut uploaded = Vec::new();
        for content in ["cmV2MQ==", "cmV2Mg==", "cmV2Mw=="] {
            assert_eq!(fx.api.handle_upload(Some(content)).await.status_code, 201);
        }
        let listing = fx
            .s3
            .list_object_versions()
            .bucket(&fx.bucket)
            .send()
            .await
            .expect("list versions");
        for version in listing.versions() {
            uploaded.push(version.version_id().expect("version id").to_owned());
        }
        // A neighbour that only shares the prefix must not show up.
        fx.s3
            .put_object()
            .bucket(&fx.bucket)
            .key(format!("{FILE_NAME}.bak"))
            .body(ByteStream::from_static(b"old"))
            .send()
            .await
            .expect("put neighbour");

        let resp = fx.api.handle_list().await;
        assert_eq!(resp.status_code, 200);
        let records: Vec<FileRecord> = serde_json::from_str(&resp.body).expect("record array");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.name == FILE_NAME));
        for id in &uploaded {
            assert!(records.iter().any(|r| &r.version == id));
        }
        assert!(records.windows(2).all(|w| w[0].date >= w[1].date));

        fx.cleanup().await;
    }
}
