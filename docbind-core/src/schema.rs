//! Schema resolution and application against a document store.
//!
//! Resolution is pure: [`collection_name_for`] and [`index_specs_for`] read
//! entity metadata and never touch the database. Application is carried by
//! [`SchemaManager`], which owns a [`StoreBackend`] and reconciles declared
//! indexes against the store with idempotent ensure-index calls.
//!
//! # Example
//!
//! ```ignore
//! use docbind::schema::SchemaManager;
//! use docbind::registry::SchemaRegistry;
//!
//! let manager = SchemaManager::new(backend);
//!
//! // Explicit, per-type setup:
//! manager.setup_collection::<Order>()?;
//!
//! // Or registry-driven discovery across a module scope:
//! let mut registry = SchemaRegistry::new();
//! registry.register::<Order>()?;
//! registry.register::<Widget>()?;
//! manager.auto_setup("myapp::model", &registry)?;
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

use crate::{
    backend::StoreBackend,
    collection::Collection,
    entity::{Entity, IndexSpec, simple_type_name},
    error::{DocBindError, DocBindResult},
    registry::SchemaRegistry,
};

/// Resolves the effective collection name for an entity type.
///
/// Resolution order: the explicit spec name when non-blank, else the type's
/// simple name.
///
/// # Errors
///
/// Returns [`DocBindError::MissingMetadata`] if the type carries no
/// collection specification.
pub fn collection_name_for<T: Entity>() -> DocBindResult<String> {
    let spec = T::collection()
        .ok_or_else(|| DocBindError::MissingMetadata(simple_type_name::<T>().to_string()))?;

    Ok(spec
        .name()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| simple_type_name::<T>())
        .to_string())
}

/// Resolves the index specifications declared on an entity type.
///
/// Possibly empty; resolvable whether or not the type declares a collection.
pub fn index_specs_for<T: Entity>() -> Vec<IndexSpec> {
    T::indexes()
}

/// Applies entity-declared schema against a document store.
///
/// The manager is stateless beyond the backend it owns: every operation's
/// effect is a deterministic function of entity metadata and current store
/// state, so all operations are safe to repeat.
#[derive(Debug)]
pub struct SchemaManager<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> SchemaManager<B> {
    /// Creates a schema manager over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a handle to the named collection.
    ///
    /// Returns `None` for a blank name. Never checks existence; document
    /// stores create collections lazily on first write.
    pub fn collection(&self, name: &str) -> Option<Collection<'_, B>> {
        if name.trim().is_empty() {
            return None;
        }

        Some(Collection::new(name.to_string(), &self.backend))
    }

    /// Returns a handle to the collection declared by an entity type.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::MissingMetadata`] if the type carries no
    /// collection specification.
    pub fn entity_collection<T: Entity>(&self) -> DocBindResult<Collection<'_, B>> {
        let name = collection_name_for::<T>()?;

        Ok(Collection::new(name, &self.backend))
    }

    /// Ensures every index declared on `T` exists on the given collection.
    ///
    /// No-op when the collection handle is absent. Issues one idempotent
    /// ensure-index request per declared spec; repeating the call with
    /// identical specs neither errors nor duplicates.
    ///
    /// # Errors
    ///
    /// Returns a [`DocBindError`] if the store rejects a request.
    pub fn ensure_indexes<T: Entity>(
        &self,
        collection: Option<&Collection<'_, B>>,
    ) -> DocBindResult<()> {
        let Some(collection) = collection else {
            return Ok(());
        };

        for spec in index_specs_for::<T>() {
            collection.create_index(&spec)?;
        }

        Ok(())
    }

    /// Sets up the collection declared by an entity type.
    ///
    /// Resolves the collection handle from the type's metadata and ensures
    /// its declared indexes.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::MissingMetadata`] if the type carries no
    /// collection specification, or a backend error from index creation.
    pub fn setup_collection<T: Entity>(&self) -> DocBindResult<()> {
        self.setup_indexes::<T>()
    }

    /// Sets up a collection by explicit name using an entity type's indexes.
    ///
    /// Silent no-op for a blank name.
    pub fn setup_collection_named<T: Entity>(&self, name: &str) -> DocBindResult<()> {
        self.setup_indexes_named::<T>(name)
    }

    /// Ensures the indexes declared by an entity type on its own collection.
    pub fn setup_indexes<T: Entity>(&self) -> DocBindResult<()> {
        let collection = self.entity_collection::<T>()?;

        self.ensure_indexes::<T>(Some(&collection))
    }

    /// Ensures the indexes declared by an entity type on a named collection.
    ///
    /// Silent no-op for a blank name.
    pub fn setup_indexes_named<T: Entity>(&self, name: &str) -> DocBindResult<()> {
        self.ensure_indexes::<T>(self.collection(name).as_ref())
    }

    /// Applies schema for every registered type inside a module scope.
    ///
    /// Skips registrations whose collection spec opted out of auto-setup.
    /// Discovery order across types is unspecified; the idempotent index
    /// operations make ordering irrelevant. An empty scope matches every
    /// registered type.
    ///
    /// # Errors
    ///
    /// Returns the first backend error encountered, if any.
    pub fn auto_setup(&self, scope: &str, registry: &SchemaRegistry) -> DocBindResult<()> {
        for entry in registry.in_scope(scope) {
            if !entry.is_auto_setup() {
                log::debug!("auto-setup skipping '{}'", entry.type_path());
                continue;
            }

            let Some(collection) = self.collection(entry.collection_name()) else {
                continue;
            };

            log::debug!(
                "auto-setup applying '{}' -> collection '{}'",
                entry.type_path(),
                collection.name()
            );
            for spec in entry.indexes() {
                collection.create_index(spec)?;
            }
        }

        Ok(())
    }

    /// Shuts down the manager, releasing the underlying backend.
    ///
    /// # Errors
    ///
    /// Returns a [`DocBindError`] if the backend fails to shut down.
    pub fn shutdown(self) -> DocBindResult<()> {
        self.backend.shutdown()
    }
}
