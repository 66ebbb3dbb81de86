//! Recipe Vault Lambda entry points.
//!
//! Each binary under `src/bin` serves one route behind API Gateway's proxy
//! integration:
//!
//! | Binary | Route | Handler |
//! |--------|-------|---------|
//! | `upload` | `POST /` | [`FileApi::handle_upload`] |
//! | `list` | `GET /` | [`FileApi::handle_list`] |
//! | `get-file-url` | `GET /{version}` | [`FileApi::handle_get_file_url`] |
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `LOG_FORMAT` | `text` | `json` for JSON log lines |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Endpoint override for S3 and SSM |
//! | `S3_FORCE_PATH_STYLE` | `false` | Path-style S3 addressing |

use std::sync::Arc;

use anyhow::{Context, Result};
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use aws_lambda_events::http::{HeaderMap, HeaderName, HeaderValue};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use recipe_vault_aws::client::{s3_client, ssm_client};
use recipe_vault_aws::{S3ObjectStore, SsmParameterResolver, load_sdk_config};
use recipe_vault_core::{FileApi, ResponseEnvelope, VaultConfig};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Path parameter carrying the revision identifier.
pub const VERSION_PATH_PARAMETER: &str = "version";

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `config.log_level`.
pub fn init_tracing(config: &VaultConfig) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level filter: {}", config.log_level))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

/// Wire a [`FileApi`] to S3 and SSM Parameter Store.
pub async fn build_file_api(config: &VaultConfig) -> FileApi {
    let sdk_config = load_sdk_config(config).await;
    let parameters = SsmParameterResolver::new(ssm_client(&sdk_config));
    let store = S3ObjectStore::new(s3_client(&sdk_config, config));
    FileApi::new(Arc::new(parameters), Arc::new(store))
}

/// `POST /`: store a new revision.
pub async fn upload(api: &FileApi, request: &ApiGatewayProxyRequest) -> ApiGatewayProxyResponse {
    let body = request_body(request);
    into_proxy_response(api.handle_upload(body.as_deref()).await)
}

/// `GET /`: list every revision.
pub async fn list(api: &FileApi) -> ApiGatewayProxyResponse {
    into_proxy_response(api.handle_list().await)
}

/// `GET /{version}`: issue a download link.
pub async fn get_file_url(
    api: &FileApi,
    request: &ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    into_proxy_response(api.handle_get_file_url(version_param(request)).await)
}

/// The request body as the client sent it.
///
/// API Gateway base64-encodes bodies it treats as binary and sets
/// `isBase64Encoded`; that layer is removed here. A body that cannot be
/// unwrapped is passed through untouched, so the handler reports it.
#[must_use]
pub fn request_body(request: &ApiGatewayProxyRequest) -> Option<String> {
    let body = request.body.as_deref()?;
    if !request.is_base64_encoded {
        return Some(body.to_owned());
    }

    match STANDARD
        .decode(body)
        .ok()
        .and_then(|raw| String::from_utf8(raw).ok())
    {
        Some(unwrapped) => Some(unwrapped),
        None => {
            warn!("proxy body flagged as base64 could not be unwrapped");
            Some(body.to_owned())
        }
    }
}

/// The `version` path parameter, if present.
#[must_use]
pub fn version_param(request: &ApiGatewayProxyRequest) -> Option<&str> {
    request
        .path_parameters
        .get(VERSION_PATH_PARAMETER)
        .map(String::as_str)
}

/// Convert a handler envelope into the proxy integration response.
///
/// Headers go out as `multiValueHeaders`. Names are lowercased by the
/// header map; entries that are not valid HTTP headers are dropped.
#[must_use]
pub fn into_proxy_response(envelope: ResponseEnvelope) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    for (name, values) in &envelope.headers {
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            warn!(header = %name, "dropping invalid header name");
            continue;
        };
        for value in values {
            match HeaderValue::from_str(value) {
                Ok(header_value) => {
                    headers.append(header_name.clone(), header_value);
                }
                Err(_) => warn!(header = %name, "dropping invalid header value"),
            }
        }
    }

    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = i64::from(envelope.status_code);
    response.multi_value_headers = headers;
    response.body = Some(Body::Text(envelope.body));
    response
}
