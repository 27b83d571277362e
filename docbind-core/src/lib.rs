//! A declarative entity binding and schema layer for document databases.
//!
//! This crate is the core of the docbind project and provides:
//!
//! - **Entity metadata** ([`entity`]) - Declarative collection and index
//!   specifications attached to entity types
//! - **Document conversion** ([`convert`]) - Configurable, soft-failing
//!   conversion between typed entities and BSON documents
//! - **Schema registry** ([`registry`]) - Type registry backing
//!   namespace-scoped schema discovery
//! - **Schema resolution and application** ([`schema`]) - Collection name
//!   and index resolution, plus idempotent application against a store
//! - **Collection handles** ([`collection`]) - Lazy named handles onto a
//!   backend
//! - **Store backend abstraction** ([`backend`]) - The seam towards concrete
//!   document store clients
//! - **Error handling** ([`error`]) - Error taxonomy and result types
//!
//! # Example
//!
//! ```ignore
//! use docbind::{Entity, convert::DocumentConverter, schema::SchemaManager};
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
//! let manager = SchemaManager::new(backend);
//! manager.setup_collection::<User>()?;
//!
//! let converter = DocumentConverter::new();
//! let document = converter.document_from(Some(&user));
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbind_core;

pub mod backend;
pub mod collection;
pub mod convert;
pub mod entity;
pub mod error;
pub mod registry;
pub mod schema;
