//! Declarative entity metadata: collection and index specifications.
//!
//! This module provides the traits and types that attach schema metadata to
//! entity types. An entity declares at most one [`CollectionSpec`] (which
//! collection it belongs to, and whether auto-setup may touch it) and any
//! number of [`IndexSpec`]s (which indexes must exist on that collection).
//!
//! Metadata is usually declared with the `#[derive(Entity)]` macro from
//! `docbind-macros`, but the trait can be implemented by hand:
//!
//! ```ignore
//! use docbind::entity::{Entity, CollectionSpec, IndexSpec, IndexDirection};
//!
//! struct Order;
//!
//! impl Entity for Order {
//!     fn collection() -> Option<CollectionSpec> {
//!         Some(CollectionSpec::named("orders"))
//!     }
//!
//!     fn indexes() -> Vec<IndexSpec> {
//!         vec![
//!             IndexSpec::on("status"),
//!             IndexSpec::on("email").unique(true),
//!         ]
//!     }
//! }
//! ```

use bson::{Document, doc};

use crate::backend::IndexSettings;

/// Trait that attaches declarative schema metadata to an entity type.
///
/// Both methods have defaults so that a type can opt into as much or as
/// little metadata as it needs. A type whose [`collection()`](Entity::collection)
/// is `None` is treated as un-annotated: resolving its collection fails with
/// [`DocBindError::MissingMetadata`](crate::error::DocBindError::MissingMetadata),
/// while its (possibly empty) index list is still resolvable.
///
/// Conversion does not require this trait; any `Serialize`/`Deserialize`
/// type flows through the [`DocumentConverter`](crate::convert::DocumentConverter).
pub trait Entity {
    /// Returns the collection specification for this type, if declared.
    fn collection() -> Option<CollectionSpec> {
        None
    }

    /// Returns the index specifications declared for this type.
    fn indexes() -> Vec<IndexSpec> {
        Vec::new()
    }
}

/// Specification of an entity type's target collection.
///
/// When no explicit name is given, the collection name falls back to the
/// type's simple name at resolution time. `no_auto_setup` excludes the type
/// from [`SchemaManager::auto_setup`](crate::schema::SchemaManager::auto_setup)
/// without affecting explicit per-type setup calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSpec {
    name: Option<String>,
    no_auto_setup: bool,
}

impl CollectionSpec {
    /// Creates a specification without an explicit name.
    ///
    /// The resolved collection name will be the entity type's simple name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a specification with an explicit collection name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            no_auto_setup: false,
        }
    }

    /// Excludes (or re-includes) this type during auto-setup.
    pub fn no_auto_setup(mut self, no_auto_setup: bool) -> Self {
        self.no_auto_setup = no_auto_setup;
        self
    }

    /// Returns the explicit collection name, if one was declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether this type participates in auto-setup.
    pub fn is_auto_setup(&self) -> bool {
        !self.no_auto_setup
    }
}

/// Direction of a single-field index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexDirection {
    /// Ascending order, stored as `1`.
    #[default]
    Asc,
    /// Descending order, stored as `-1`.
    Desc,
}

impl IndexDirection {
    /// Returns the store-native direction marker (`1` or `-1`).
    pub fn as_i32(self) -> i32 {
        match self {
            IndexDirection::Asc => 1,
            IndexDirection::Desc => -1,
        }
    }
}

/// Specification of one index derived from entity metadata.
///
/// The `key` is the *document* field name, not the entity's field name; the
/// two differ whenever serde renames are in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    key: String,
    direction: IndexDirection,
    unique: bool,
    background: bool,
}

impl IndexSpec {
    /// Creates an index specification on the given document field.
    ///
    /// Defaults: ascending, non-unique, foreground build.
    pub fn on(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: IndexDirection::Asc,
            unique: false,
            background: false,
        }
    }

    /// Sets the index direction.
    pub fn direction(mut self, direction: IndexDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Makes the index enforce uniqueness.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Builds the index in the background.
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Returns the indexed document field name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the index direction.
    pub fn index_direction(&self) -> IndexDirection {
        self.direction
    }

    /// Returns whether the index enforces uniqueness.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns whether the index is built in the background.
    pub fn is_background(&self) -> bool {
        self.background
    }

    /// Returns the store-native keys document, `{key: direction}`.
    pub fn keys_document(&self) -> Document {
        doc! { self.key.clone(): self.direction.as_i32() }
    }

    /// Returns the store-native option set for this index.
    pub fn settings(&self) -> IndexSettings {
        IndexSettings {
            unique: self.unique,
            background: self.background,
        }
    }
}

/// Returns the simple (unqualified, generics-stripped) name of a type.
pub(crate) fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn test_collection_spec_defaults() {
        let spec = CollectionSpec::new();
        assert_eq!(spec.name(), None);
        assert!(spec.is_auto_setup());
    }

    #[test]
    fn test_collection_spec_named() {
        let spec = CollectionSpec::named("widgets").no_auto_setup(true);
        assert_eq!(spec.name(), Some("widgets"));
        assert!(!spec.is_auto_setup());
    }

    #[test]
    fn test_index_spec_defaults() {
        let spec = IndexSpec::on("status");
        assert_eq!(spec.key(), "status");
        assert_eq!(spec.index_direction(), IndexDirection::Asc);
        assert!(!spec.is_unique());
        assert!(!spec.is_background());
    }

    #[test]
    fn test_index_spec_keys_document() {
        let asc = IndexSpec::on("status");
        assert_eq!(asc.keys_document(), doc! { "status": 1 });

        let desc = IndexSpec::on("created_at").direction(IndexDirection::Desc);
        assert_eq!(desc.keys_document(), doc! { "created_at": -1 });
    }

    #[test]
    fn test_index_spec_settings() {
        let spec = IndexSpec::on("email").unique(true).background(true);
        let settings = spec.settings();
        assert!(settings.unique);
        assert!(settings.background);
    }

    #[test]
    fn test_entity_defaults() {
        struct Plain;
        impl Entity for Plain {}

        assert_eq!(Plain::collection(), None);
        assert!(Plain::indexes().is_empty());
    }

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name::<Widget>(), "Widget");
        assert_eq!(simple_type_name::<Vec<Widget>>(), "Vec");
        assert_eq!(simple_type_name::<String>(), "String");
    }
}
