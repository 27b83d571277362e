//! Main docbind crate providing a declarative entity binding and schema
//! layer for document databases.
//!
//! This crate is the primary entry point for users of the docbind framework.
//! It re-exports the core types and functionality from various sub-crates
//! and provides convenient access to the available schema backends.
//!
//! # Features
//!
//! - **Declarative schema metadata** - Attach collection names and index
//!   definitions to entity types with `#[derive(Entity)]` attributes
//! - **Idempotent schema application** - Reconcile declared indexes against
//!   a live store; repeated application neither errors nor duplicates
//! - **Soft-failing document conversion** - Convert entities to and from
//!   BSON documents under a configurable mapping policy, without exceptions
//!   crossing the conversion API
//! - **Namespace discovery** - Register entity types once and apply schema
//!   for a whole module scope in one call
//!
//! # Quick Start
//!
//! ```ignore
//! use docbind::prelude::*;
//! use docbind::memory::InMemoryBackend;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
//! #[entity(collection = "users")]
//! #[index(key = "email", unique)]
//! pub struct User {
//!     pub name: String,
//!     pub email: String,
//! }
//!
//! fn main() -> DocBindResult<()> {
//!     let manager = SchemaManager::new(InMemoryBackend::new());
//!
//!     // Apply the declared schema; safe to repeat.
//!     manager.setup_collection::<User>()?;
//!
//!     // Convert entities to documents and back.
//!     let converter = DocumentConverter::new();
//!     let user = User { name: "Alice".to_string(), email: "alice@example.com".to_string() };
//!     let document = converter.document_from(Some(&user)).unwrap();
//!     let restored: User = converter.entity_from(Some(&document)).unwrap();
//!
//!     manager.shutdown()
//! }
//! ```
//!
//! # Namespace discovery
//!
//! Register annotated types in a [`SchemaRegistry`](registry::SchemaRegistry)
//! and apply a whole scope at once. Types marked `no_auto_setup` are
//! skipped:
//!
//! ```ignore
//! use docbind::prelude::*;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register::<model::User>()?;
//! registry.register::<model::Order>()?;
//!
//! manager.auto_setup("myapp::model", &registry)?;
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Recording in-memory backend for development and testing
//! - [`mongodb`] - MongoDB backend over the official blocking driver
//!   (requires the `mongodb` feature)

pub mod prelude;

pub use docbind_core::{backend, collection, convert, entity, error, registry, schema};

/// Derive macro turning `#[entity(...)]` / `#[index(...)]` attributes into
/// an [`entity::Entity`] implementation.
pub use docbind_macros::Entity;

// Re-export BSON types for convenience
pub use bson;

/// In-memory schema backend implementations.
pub mod memory {
    pub use docbind_memory::{EnsuredIndex, InMemoryBackend, InMemoryBackendBuilder};
}

/// MongoDB schema backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docbind_mongodb::{DEFAULT_HOST, DEFAULT_PORT, MongoBackend, MongoBackendBuilder};
}
