//! Upload handler: stores the base64 request body as a new revision.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use recipe_vault_core::VaultConfig;
use recipe_vault_lambda::{build_file_api, init_tracing, upload};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = VaultConfig::from_env();
    init_tracing(&config)?;
    let api = build_file_api(&config).await;

    lambda_runtime::run(service_fn(
        |event: LambdaEvent<ApiGatewayProxyRequest>| {
            let api = &api;
            async move { Ok::<_, Error>(upload(api, &event.payload).await) }
        },
    ))
    .await
}
