//! AWS adapters for Recipe Vault.
//!
//! - [`S3ObjectStore`] implements [`recipe_vault_core::ObjectStore`] on S3.
//! - [`SsmParameterResolver`] implements
//!   [`recipe_vault_core::ParameterResolver`] on SSM Parameter Store.
//! - [`client`] loads the shared SDK configuration, honoring the endpoint
//!   override in [`recipe_vault_core::VaultConfig`].

pub mod client;
pub mod s3;
pub mod ssm;

pub use client::load_sdk_config;
pub use s3::S3ObjectStore;
pub use ssm::SsmParameterResolver;
