//! Error types for Recipe Vault.
//!
//! [`ParameterError`] and [`StoreError`] are raised by the service adapters
//! behind [`crate::ports`]. [`ConfigError`] is raised by the configuration
//! resolver. Handlers fold all of them into [`FileApiError`], whose
//! [`FileApiError::status_code`] picks the HTTP status of the response.
//!
//! ```
//! use recipe_vault_core::error::FileApiError;
//!
//! let err = FileApiError::InvalidInput("No request body supplied!".to_owned());
//! assert_eq!(err.status_code(), 400);
//! ```

use crate::duration::DurationParseError;

/// Failure to read a parameter from the parameter store.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// The parameter does not exist.
    #[error("parameter {name} not found")]
    NotFound {
        /// Parameter path.
        name: String,
    },

    /// The store could not be reached or refused the call.
    #[error("parameter store unreachable while reading {name}: {message}")]
    Unreachable {
        /// Parameter path.
        name: String,
        /// Full error context from the client.
        message: String,
    },
}

/// Failure to resolve one of the handler configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Parameter lookup failed.
    #[error("error when getting parameter: {0}")]
    Parameter(#[from] ParameterError),

    /// The lifespan parameter is not a valid positive duration.
    #[error("error when parsing parameter {name}: {source}")]
    Parse {
        /// Parameter path.
        name: String,
        /// Parser diagnostic.
        #[source]
        source: DurationParseError,
    },
}

/// Failure reported by an [`crate::ports::ObjectStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object version does not exist.
    #[error("version {version_id} of {key} not found")]
    NotFound {
        /// Object key.
        key: String,
        /// Version identifier.
        version_id: String,
    },

    /// The storage call failed.
    #[error("{operation} failed: {message}")]
    Request {
        /// Storage operation name, e.g. `PutObject`.
        operation: &'static str,
        /// Full error context from the client.
        message: String,
    },

    /// A presigned URL could not be produced.
    #[error("failed to presign URL: {0}")]
    Signing(String),
}

impl StoreError {
    /// Build a [`StoreError::Request`] from any displayable error.
    pub fn request(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Request {
            operation,
            message: err.to_string(),
        }
    }
}

/// Handler-level error; every variant maps to one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum FileApiError {
    /// The caller sent a missing or empty input (400).
    #[error("{0}")]
    InvalidInput(String),

    /// The requested version does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The upload body is not valid base64 (500).
    #[error("Error decoding base64 string")]
    Decode(#[source] base64::DecodeError),

    /// Bucket name or lifespan could not be resolved (500).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A storage call or response serialization failed (500).
    #[error("{0}")]
    Upstream(String),

    /// The download link could not be signed (500).
    #[error("{0}")]
    Signing(String),
}

impl FileApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Decode(_) | Self::Config(_) | Self::Upstream(_) | Self::Signing(_) => 500,
        }
    }

    /// Whether the caller is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<StoreError> for FileApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Request { .. } => Self::Upstream(err.to_string()),
            StoreError::Signing(_) => Self::Signing(err.to_string()),
        }
    }
}
