//! In-memory schema backend for docbind.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait. It records ensure-index requests instead of
//! building real indexes, which makes it ideal for development and for
//! asserting schema-application behavior in tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use docbind::{schema::SchemaManager, memory::InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! let manager = SchemaManager::new(backend.clone());
//!
//! manager.setup_collection::<User>()?;
//! assert_eq!(backend.index_count("users"), 1);
//! # Ok::<(), docbind::error::DocBindError>(())
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbind_memory;

pub mod store;

pub use store::{EnsuredIndex, InMemoryBackend, InMemoryBackendBuilder};
