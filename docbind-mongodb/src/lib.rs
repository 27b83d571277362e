//! MongoDB schema backend for docbind.
//!
//! This crate implements the `StoreBackend` trait over the official
//! `mongodb` driver's blocking API. Index application maps directly onto
//! `createIndexes`, which is idempotent at the server for identical
//! key/options combinations.
//!
//! # Quick Start
//!
//! ```ignore
//! use docbind::{schema::SchemaManager, mongodb::MongoBackend};
//!
//! let backend = MongoBackend::builder()
//!     .host("localhost")
//!     .port(27017)
//!     .database("appdata")
//!     .build()?;
//!
//! let manager = SchemaManager::new(backend);
//! manager.setup_collection::<User>()?;
//! manager.shutdown()?;
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbind_mongodb;

pub mod store;

pub use store::{DEFAULT_HOST, DEFAULT_PORT, MongoBackend, MongoBackendBuilder};
