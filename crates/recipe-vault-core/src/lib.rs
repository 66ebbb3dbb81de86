//! Handlers, response contract, and configuration resolution for Recipe Vault.
//!
//! Recipe Vault keeps every revision of a single file in a versioned bucket.
//! Three handlers front it: upload a new revision, list all revisions, and
//! issue a time-limited download link for one revision.
//!
//! # Architecture
//!
//! ```text
//! API Gateway proxy event (apps/recipe-vault-lambda)
//!        |
//!        v
//!   FileApi::handle_{upload,list,get_file_url}
//!        |                      |
//!        v                      v
//!   ConfigResolver         dyn ObjectStore
//!        |
//!        v
//!   dyn ParameterResolver
//! ```
//!
//! Every handler returns a [`ResponseEnvelope`] built by
//! [`response::build_response`], which wraps error bodies in
//! `{"message", "status"}` and attaches the baseline security headers.

pub mod config;
pub mod duration;
pub mod error;
pub mod memory;
pub mod model;
mod ops;
pub mod ports;
pub mod provider;
pub mod resolver;
pub mod response;

pub use config::VaultConfig;
pub use error::{ConfigError, FileApiError, ParameterError, StoreError};
pub use model::{FILE_NAME, FileRecord, ObjectMetadata, ObjectVersion};
pub use ports::{ObjectStore, ParameterResolver};
pub use provider::FileApi;
pub use resolver::ConfigResolver;
pub use response::{HeaderMap, ResponseEnvelope, build_response};
