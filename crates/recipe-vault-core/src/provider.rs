//! The file API provider.
//!
//! [`FileApi`] owns the two service capabilities. The individual handlers
//! are implemented in the `ops` submodules, one `impl FileApi` block each.

use std::sync::Arc;

use crate::error::FileApiError;
use crate::ports::{ObjectStore, ParameterResolver};
use crate::resolver::ConfigResolver;
use crate::response::ResponseEnvelope;

/// Upload, list, and link handlers over one versioned file.
///
/// Cheap to clone; both capabilities are `Arc`-shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use recipe_vault_core::FileApi;
/// use recipe_vault_core::memory::{InMemoryObjectStore, InMemoryParameterStore};
///
/// let api = FileApi::new(
///     Arc::new(InMemoryParameterStore::new()),
///     Arc::new(InMemoryObjectStore::default()),
/// );
/// let response = tokio_test::block_on(api.handle_upload(None));
/// assert_eq!(response.status_code, 400);
/// ```
#[derive(Debug, Clone)]
pub struct FileApi {
    pub(crate) config: ConfigResolver,
    pub(crate) store: Arc<dyn ObjectStore>,
}

impl FileApi {
    /// Create a provider from a parameter store and an object store.
    #[must_use]
    pub fn new(parameters: Arc<dyn ParameterResolver>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config: ConfigResolver::new(parameters),
            store,
        }
    }

    /// The configuration resolver.
    #[must_use]
    pub fn config(&self) -> &ConfigResolver {
        &self.config
    }
}

/// Turn a handler result into the response it is rendered as.
pub(crate) fn respond(result: Result<ResponseEnvelope, FileApiError>) -> ResponseEnvelope {
    result.unwrap_or_else(ResponseEnvelope::from)
}
