//! Collection handles for schema application.
//!
//! A [`Collection`] is a lazy, named handle onto a backend: obtaining one
//! never touches the store, because document databases create collections on
//! first write. The handle's only schema-level operation is issuing
//! ensure-index requests derived from an [`IndexSpec`].

use std::fmt;

use crate::{backend::StoreBackend, entity::IndexSpec, error::DocBindResult};

/// A named collection handle with a reference to a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
pub struct Collection<'a, B: StoreBackend> {
    name: String,
    backend: &'a B,
}

impl<'a, B: StoreBackend> Collection<'a, B> {
    /// Creates a new collection handle (internal use).
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ensures the index described by `spec` exists on this collection.
    ///
    /// Translates the spec into the store-native keys document
    /// `{key: direction}` plus `{unique, background}` settings. Idempotent:
    /// repeating the call with an identical spec neither errors nor creates
    /// a duplicate.
    ///
    /// # Errors
    ///
    /// Returns a [`DocBindError`](crate::error::DocBindError) if the store
    /// rejects the request.
    pub fn create_index(&self, spec: &IndexSpec) -> DocBindResult<()> {
        log::debug!(
            "ensuring index on '{}': {} (unique: {}, background: {})",
            self.name,
            spec.key(),
            spec.is_unique(),
            spec.is_background()
        );
        self.backend
            .ensure_index(&self.name, spec.keys_document(), spec.settings())
    }
}

impl<B: StoreBackend> fmt::Debug for Collection<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
