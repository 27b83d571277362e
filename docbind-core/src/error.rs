//! Error types and result types for entity binding and schema operations.
//!
//! This module provides the error taxonomy for the whole crate. Use
//! [`DocBindResult<T>`] as the return type for fallible operations.
//!
//! Conversion failures occupy a special place in the taxonomy: the
//! [`DocumentConverter`](crate::convert::DocumentConverter) contains them
//! locally (logged, surfaced as `None`), so [`DocBindError::Conversion`] is
//! only ever observed by callers that use the underlying
//! [`DocumentMapper`](crate::convert::DocumentMapper) directly.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors raised by the binding and schema layer.
#[derive(Error, Debug)]
pub enum DocBindError {
    /// A document/entity value was incompatible with the target shape.
    ///
    /// Never propagated across the converter API; the converter logs it and
    /// returns `None` instead.
    #[error("Conversion error: {0}")]
    Conversion(String),
    /// Collection resolution was requested for a type that carries no
    /// collection metadata.
    #[error("Missing collection metadata on type '{0}'")]
    MissingMetadata(String),
    /// A builder was given an invalid configuration value (blank host,
    /// zero port, missing database name). Raised before any connection
    /// attempt.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Error while constructing a store handle or connection.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An error reported by the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for entity binding and schema operations.
pub type DocBindResult<T> = Result<T, DocBindError>;

impl From<BsonError> for DocBindError {
    fn from(err: BsonError) -> Self {
        DocBindError::Conversion(err.to_string())
    }
}
