//! Convenient re-exports of commonly used types from docbind.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docbind::prelude::*;
//! ```
//!
//! This provides access to:
//! - The `Entity` trait and its derive macro
//! - Collection and index specifications
//! - The document converter and its configuration features
//! - Schema resolution, application, and registry types
//! - Store backend traits and error types

pub use docbind_core::{
    backend::{IndexSettings, StoreBackend, StoreBackendBuilder},
    collection::Collection,
    convert::{
        DeserializeFeature, DocumentConverter, DocumentConverterBuilder, DocumentMapper, Feature,
        MapperFeature, SerializeFeature,
    },
    entity::{CollectionSpec, Entity, IndexDirection, IndexSpec},
    error::{DocBindError, DocBindResult},
    registry::{EntityRegistration, SchemaRegistry},
    schema::{SchemaManager, collection_name_for, index_specs_for},
};

pub use docbind_macros::Entity;
