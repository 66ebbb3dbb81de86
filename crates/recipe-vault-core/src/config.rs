//! Process-level configuration.
//!
//! [`VaultConfig`] covers what the deployment environment decides: logging
//! and where the AWS clients point. The bucket name and URL lifespan are not
//! part of it; those live in the parameter store and are resolved on every
//! request by [`crate::resolver::ConfigResolver`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Environment-driven configuration shared by the three Lambda binaries.
///
/// # Examples
///
/// ```
/// use recipe_vault_core::config::VaultConfig;
///
/// let config = VaultConfig::default();
/// assert_eq!(config.log_level, "info");
/// assert!(config.endpoint_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct VaultConfig {
    /// Log level filter used when `RUST_LOG` is unset (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    #[builder(default = false)]
    pub log_json: bool,

    /// Endpoint override for S3 and SSM, e.g. a local emulator.
    #[builder(default, setter(strip_option, into))]
    pub endpoint_url: Option<String>,

    /// Use path-style S3 addressing (`host/bucket/key`).
    #[builder(default = false)]
    pub s3_force_path_style: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            log_json: false,
            endpoint_url: None,
            s3_force_path_style: false,
        }
    }
}

impl VaultConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `text` (`json` enables JSON logs) |
    /// | `AWS_ENDPOINT_URL` | *(unset)* |
    /// | `S3_FORCE_PATH_STYLE` | `false` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            config.log_json = v.eq_ignore_ascii_case("json");
        }
        if let Some(v) = lookup("AWS_ENDPOINT_URL") {
            if !v.trim().is_empty() {
                config.endpoint_url = Some(v);
            }
        }
        if let Some(v) = lookup("S3_FORCE_PATH_STYLE") {
            config.s3_force_path_style = parse_bool(&v);
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
