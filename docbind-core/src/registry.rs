//! Type registry backing namespace-scoped schema discovery.
//!
//! Annotated entity types register themselves here (usually once, at
//! startup), recording their resolved collection name, auto-setup
//! eligibility, and index specifications. Scope discovery then becomes a
//! registry query over the registered types' module paths, with no runtime
//! reflection involved.
//!
//! # Example
//!
//! ```ignore
//! use docbind::registry::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register::<model::Widget>()?;
//! registry.register::<model::Order>()?;
//!
//! manager.auto_setup("myapp::model", &registry)?;
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

use std::any::TypeId;

use crate::{
    entity::{Entity, IndexSpec, simple_type_name},
    error::{DocBindError, DocBindResult},
    schema::collection_name_for,
};

/// One registered entity type with its resolved schema metadata.
#[derive(Debug, Clone)]
pub struct EntityRegistration {
    type_id: TypeId,
    type_path: &'static str,
    collection_name: String,
    auto_setup: bool,
    indexes: Vec<IndexSpec>,
}

impl EntityRegistration {
    /// Returns the fully qualified path of the registered type.
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the collection name resolved at registration time.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Returns whether the type participates in auto-setup.
    pub fn is_auto_setup(&self) -> bool {
        self.auto_setup
    }

    /// Returns the index specifications declared on the type.
    pub fn indexes(&self) -> &[IndexSpec] {
        &self.indexes
    }

    fn module_path(&self) -> &'static str {
        self.type_path
            .rsplit_once("::")
            .map(|(module, _)| module)
            .unwrap_or("")
    }
}

/// Registry of entity types keyed by type identity.
///
/// Registration is idempotent per type: registering the same type again
/// replaces its previous entry. Iteration order across entries is
/// unspecified (set semantics); the idempotent index operations downstream
/// make ordering irrelevant.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: Vec<EntityRegistration>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity type, recording its resolved schema metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::MissingMetadata`] if the type carries no
    /// collection specification.
    pub fn register<T: Entity + 'static>(&mut self) -> DocBindResult<()> {
        let spec = T::collection()
            .ok_or_else(|| DocBindError::MissingMetadata(simple_type_name::<T>().to_string()))?;

        let registration = EntityRegistration {
            type_id: TypeId::of::<T>(),
            type_path: std::any::type_name::<T>(),
            collection_name: collection_name_for::<T>()?,
            auto_setup: spec.is_auto_setup(),
            indexes: T::indexes(),
        };

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.type_id == registration.type_id)
        {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }

        Ok(())
    }

    /// Returns the registrations whose defining module falls inside `scope`.
    ///
    /// `scope` is a module path prefix matched on `::` boundaries: scope
    /// `"myapp::model"` covers `myapp::model` and `myapp::model::orders`,
    /// but not `myapp::modeling`. An empty scope matches every entry.
    pub fn in_scope<'a>(&'a self, scope: &'a str) -> impl Iterator<Item = &'a EntityRegistration> {
        self.entries.iter().filter(move |entry| {
            if scope.is_empty() {
                return true;
            }
            let module = entry.module_path();
            module == scope
                || (module.starts_with(scope) && module[scope.len()..].starts_with("::"))
        })
    }

    /// Returns all registrations.
    pub fn entries(&self) -> &[EntityRegistration] {
        &self.entries
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
