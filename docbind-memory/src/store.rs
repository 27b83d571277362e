//! Recording in-memory backend implementation.

use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

use bson::Document;
use docbind_core::{
    backend::{IndexSettings, StoreBackend, StoreBackendBuilder},
    error::{DocBindError, DocBindResult},
};

/// One index the backend has been asked to ensure.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsuredIndex {
    /// The keys document of the request, e.g. `{ "email": 1 }`.
    pub keys: Document,
    /// The option set of the request.
    pub settings: IndexSettings,
}

type IndexMap = HashMap<String, Vec<EnsuredIndex>>;

/// Thread-safe in-memory schema backend.
///
/// Ensure-index requests are recorded per collection. A repeated request
/// with identical keys and settings is a no-op; the same keys with
/// different settings is rejected, mirroring the options-conflict behavior
/// of a real document store.
///
/// `InMemoryBackend` is cloneable and shares its state across clones, so a
/// test can hand one clone to a `SchemaManager` and keep another for
/// inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    indexes: Arc<RwLock<IndexMap>>,
}

impl InMemoryBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryBackend`.
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::default()
    }

    /// Returns the indexes ensured on a collection, in request order.
    pub fn indexes(&self, collection: &str) -> Vec<EnsuredIndex> {
        self.indexes
            .read()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of distinct indexes ensured on a collection.
    pub fn index_count(&self, collection: &str) -> usize {
        self.indexes
            .read()
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Returns the names of all collections touched by schema application.
    pub fn collections(&self) -> Vec<String> {
        self.indexes.read().keys().cloned().collect()
    }
}

impl StoreBackend for InMemoryBackend {
    fn ensure_index(
        &self,
        collection: &str,
        keys: Document,
        settings: IndexSettings,
    ) -> DocBindResult<()> {
        let mut indexes = self.indexes.write();
        let entries = indexes.entry(collection.to_string()).or_default();

        if let Some(existing) = entries.iter().find(|entry| entry.keys == keys) {
            if existing.settings == settings {
                return Ok(());
            }
            return Err(DocBindError::Backend(format!(
                "index options conflict on '{collection}' for keys {keys}"
            )));
        }

        entries.push(EnsuredIndex { keys, settings });

        Ok(())
    }
}

/// Builder for constructing an [`InMemoryBackend`].
///
/// Currently carries no options; it exists for parity with the
/// [`StoreBackendBuilder`] seam.
#[derive(Debug, Default)]
pub struct InMemoryBackendBuilder;

impl StoreBackendBuilder for InMemoryBackendBuilder {
    type Backend = InMemoryBackend;

    fn build(self) -> DocBindResult<Self::Backend> {
        Ok(InMemoryBackend::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_ensure_index_records_request() {
        let backend = InMemoryBackend::new();
        backend
            .ensure_index("users", doc! { "email": 1 }, IndexSettings { unique: true, background: false })
            .unwrap();

        let indexes = backend.indexes("users");
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].keys, doc! { "email": 1 });
        assert!(indexes[0].settings.unique);
    }

    #[test]
    fn test_ensure_index_is_idempotent() {
        let backend = InMemoryBackend::new();
        let settings = IndexSettings::default();

        backend.ensure_index("users", doc! { "name": 1 }, settings).unwrap();
        backend.ensure_index("users", doc! { "name": 1 }, settings).unwrap();

        assert_eq!(backend.index_count("users"), 1);
    }

    #[test]
    fn test_ensure_index_rejects_options_conflict() {
        let backend = InMemoryBackend::new();

        backend
            .ensure_index("users", doc! { "name": 1 }, IndexSettings::default())
            .unwrap();
        let result = backend.ensure_index(
            "users",
            doc! { "name": 1 },
            IndexSettings { unique: true, background: false },
        );

        assert!(matches!(result, Err(DocBindError::Backend(_))));
    }

    #[test]
    fn test_clones_share_state() {
        let backend = InMemoryBackend::new();
        let observer = backend.clone();

        backend
            .ensure_index("orders", doc! { "status": 1 }, IndexSettings::default())
            .unwrap();

        assert_eq!(observer.index_count("orders"), 1);
        assert_eq!(observer.collections(), vec!["orders".to_string()]);
    }
}
