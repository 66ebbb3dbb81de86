//! Upload integration tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use recipe_vault_core::FILE_NAME;

    use crate::{VaultFixture, error_message};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_store_decoded_bytes_as_new_version() {
        let fx = VaultFixture::setup("upload", "15m").await;
        let payload = b"%PDF-1.4 grandma's lasagne";

        let resp = fx.api.handle_upload(Some(&STANDARD.encode(payload))).await;
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.body, "");
        assert_eq!(resp.header("Cache-Control"), Some(&["no-store".to_owned()][..]));

        let object = fx
            .s3
            .get_object()
            .bucket(&fx.bucket)
            .key(FILE_NAME)
            .send()
            .await
            .expect("get uploaded object");
        let bytes = object.body.collect().await.expect("read body").into_bytes();
        assert_eq!(bytes.as_ref(), payload);

        fx.cleanup().await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_empty_and_malformed_bodies() {
        let fx = VaultFixture::setup("upload-bad", "15m").await;

        let resp = fx.api.handle_upload(None).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(error_message(&resp.body), "No request body supplied!");

        let resp = fx.api.handle_upload(Some("not base64!")).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(error_message(&resp.body), "Error decoding base64 string");

        let listing = fx
            .s3
            .list_object_versions()
            .bucket(&fx.bucket)
            .send()
            .await
            .expect("list versions");
        assert!(listing.versions().is_empty());

        fx.cleanup().await;
    }
}
