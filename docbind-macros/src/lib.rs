//! Procedural macros for the docbind project.
//!
//! This crate provides the `#[derive(Entity)]` macro, which turns
//! declarative attributes into an `Entity` trait implementation carrying
//! collection and index metadata.

#[allow(unused_extern_crates)]
extern crate self as docbind_macros;

mod entity;

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, parse_macro_input};

use crate::entity::generate_entity_for_struct;

/// Derives the `Entity` trait from declarative schema attributes.
///
/// # Attributes
///
/// - `#[entity]` - marks the type as collection-bound, with the collection
///   name defaulting to the type's simple name
/// - `#[entity(collection = "name")]` - explicit collection name
/// - `#[entity(no_auto_setup)]` - excludes the type from auto-setup
/// - `#[index(key = "field")]` - declares an index (repeatable); optional
///   `direction = "asc" | "desc"`, plus bare `unique` and `background` flags
///
/// Omitting the `#[entity]` attribute leaves `Entity::collection()` at its
/// `None` default, so the type converts like any other but cannot resolve a
/// collection.
///
/// # Errors
///
/// Compile error when applied to enums, unions, or tuple structs, when an
/// `#[index]` lacks its `key`, or on unknown attribute keys.
///
/// # Examples
///
/// ```rust,ignore
/// use docbind::Entity;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
/// #[entity(collection = "orders")]
/// #[index(key = "status")]
/// #[index(key = "email", unique)]
/// pub struct Order {
///     pub status: String,
///     pub email: String,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity, index))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_entity_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => e.to_compile_error().into(),
        },
        Data::Enum(_) => syn::Error::new_spanned(
            &ast,
            "Cannot derive Entity for enums. Only structs with named fields are supported.",
        )
        .to_compile_error()
        .into(),
        Data::Union(_) => syn::Error::new_spanned(
            &ast,
            "Cannot derive Entity for unions. Only structs with named fields are supported.",
        )
        .to_compile_error()
        .into(),
    }
}
