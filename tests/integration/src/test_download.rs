//! Download link integration tests.

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use recipe_vault_core::model::URL_LIFESPAN_PARAMETER;

    use crate::{VaultFixture, error_message, put_parameter};

    async fn latest_version(fx: &VaultFixture) -> String {
        let resp = fx.api.handle_list().await;
        let records: serde_json::Value = serde_json::from_str(&resp.body).expect("records");
        records[0]["version"].as_str().expect("version").to_owned()
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_issue_working_link_for_each_version() {
        let fx = VaultFixture::setup("link", "15m").await;

        fx.api.handle_upload(Some(&STANDARD.encode(b"first"))).await;
        let first = latest_version(&fx).await;
        fx.api.handle_upload(Some(&STANDARD.encode(b"second"))).await;

        let resp = fx.api.handle_get_file_url(Some(&first)).await;
        assert_eq!(resp.status_code, 200);
        assert!(resp.body.contains("X-Amz-Expires=900"));

        let fetched = reqwest::get(&resp.body).await.expect("fetch presigned url");
        assert!(fetched.status().is_success());
        assert_eq!(fetched.bytes().await.expect("body").as_ref(), b"first");

        fx.cleanup().await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unknown_version() {
        let fx = VaultFixture::setup("link-missing", "15m").await;
        fx.api.handle_upload(Some(&STANDARD.encode(b"only"))).await;

        let resp = fx.api.handle_get_file_url(Some("does-not-exist")).await;
        assert_eq!(resp.status_code, 404);
        assert_eq!(
            error_message(&resp.body),
            "version does-not-exist not found for file recipes.pdf"
        );

        fx.cleanup().await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_on_malformed_lifespan_parameter() {
        let fx = VaultFixture::setup("link-ttl", "15m").await;
        fx.api.handle_upload(Some(&STANDARD.encode(b"pdf"))).await;
        let version = latest_version(&fx).await;

        put_parameter(&fx.ssm, URL_LIFESPAN_PARAMETER, "soon").await;
        let resp = fx.api.handle_get_file_url(Some(&version)).await;
        assert_eq!(resp.status_code, 500);
        assert!(error_message(&resp.body).contains(URL_LIFESPAN_PARAMETER));

        fx.cleanup().await;
    }
}
