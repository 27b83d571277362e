//! Storage backend abstraction for schema application.
//!
//! This module defines the seam between the schema layer and a concrete
//! document store. The layer needs very little from a store: a way to issue
//! idempotent "ensure index" requests against a named collection, and an
//! explicit shutdown hook. Everything else (wire protocol, retries,
//! timeouts, pooling) belongs to the store client behind the trait.
//!
//! # Traits
//!
//! - [`StoreBackend`]: the core trait for storage backends
//! - [`StoreBackendBuilder`]: factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use docbind::backend::{StoreBackend, IndexSettings};
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! backend.ensure_index("users", doc! { "email": 1 }, IndexSettings { unique: true, background: false })?;
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

use bson::Document;
use std::fmt::Debug;

use crate::error::DocBindResult;

/// Option set attached to an ensure-index request.
///
/// Mirrors the index options the schema layer derives from entity metadata;
/// anything beyond uniqueness and background builds is out of scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSettings {
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Whether the index is built in the background.
    pub background: bool,
}

/// Abstract interface for document storage backends.
///
/// Implementations must be thread-safe; all calls are synchronous and
/// blocking. Collections are never created explicitly; document stores
/// create them lazily on first write, and an ensure-index request against a
/// not-yet-existing collection must be honored the same way.
///
/// # Idempotence
///
/// `ensure_index` is required to be idempotent: repeating a request with an
/// identical keys document and identical settings must neither error nor
/// create a duplicate index. Requesting the same keys with *different*
/// settings is a conflict and should surface as a
/// [`DocBindError::Backend`](crate::error::DocBindError::Backend).
pub trait StoreBackend: Send + Sync + Debug {
    /// Ensures an index with the given keys document and settings exists on
    /// the named collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The collection name. Created lazily if absent.
    /// * `keys` - The keys document, e.g. `{ "email": 1 }`
    /// * `settings` - Uniqueness and background-build options
    ///
    /// # Errors
    ///
    /// Returns a [`DocBindError`](crate::error::DocBindError) if the store
    /// rejects the request.
    fn ensure_index(
        &self,
        collection: &str,
        keys: Document,
        settings: IndexSettings,
    ) -> DocBindResult<()>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding connections
    /// should override this.
    fn shutdown(self) -> DocBindResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    fn ensure_index(
        &self,
        collection: &str,
        keys: Document,
        settings: IndexSettings,
    ) -> DocBindResult<()> {
        (*self).ensure_index(collection, keys, settings)
    }
}

/// Factory trait for creating backend instances.
pub trait StoreBackendBuilder {
    /// The backend type this builder produces.
    type Backend: StoreBackend;

    /// Validates the accumulated configuration and constructs the backend.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::InvalidConfiguration`](crate::error::DocBindError::InvalidConfiguration)
    /// for invalid settings, or
    /// [`DocBindError::Initialization`](crate::error::DocBindError::Initialization)
    /// if handle construction fails.
    fn build(self) -> DocBindResult<Self::Backend>;
}
