use proc_macro::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, LitStr, Meta, Result};

struct IndexAttr {
    key: String,
    descending: bool,
    unique: bool,
    background: bool,
}

pub(crate) fn generate_entity_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    if !matches!(data.fields, Fields::Named(_)) {
        return Err(syn::Error::new_spanned(
            ast,
            "Entity can only be derived for structs with named fields",
        ));
    }

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let mut has_collection = false;
    let mut collection_name: Option<String> = None;
    let mut no_auto_setup = false;
    let mut indexes: Vec<IndexAttr> = Vec::new();

    for attr in &ast.attrs {
        if attr.path().is_ident("entity") {
            has_collection = true;

            // A bare `#[entity]` carries no arguments to parse.
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("collection") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    collection_name = Some(s.value());
                    Ok(())
                } else if meta.path.is_ident("no_auto_setup") {
                    no_auto_setup = true;
                    Ok(())
                } else {
                    Err(meta.error("Unknown entity attribute"))
                }
            })?;
        } else if attr.path().is_ident("index") {
            let mut key: Option<String> = None;
            let mut descending = false;
            let mut unique = false;
            let mut background = false;

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    key = Some(s.value());
                    Ok(())
                } else if meta.path.is_ident("direction") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    match s.value().to_ascii_lowercase().as_str() {
                        "asc" => {
                            descending = false;
                            Ok(())
                        }
                        "desc" => {
                            descending = true;
                            Ok(())
                        }
                        other => Err(meta.error(format!(
                            "Unknown index direction '{other}', expected \"asc\" or \"desc\""
                        ))),
                    }
                } else if meta.path.is_ident("unique") {
                    unique = true;
                    Ok(())
                } else if meta.path.is_ident("background") {
                    background = true;
                    Ok(())
                } else {
                    Err(meta.error("Unknown index attribute"))
                }
            })?;

            let Some(key) = key else {
                return Err(syn::Error::new_spanned(attr, "Index `key` is required"));
            };
            indexes.push(IndexAttr { key, descending, unique, background });
        }
    }

    let collection_code = if has_collection {
        let spec = match &collection_name {
            Some(collection_name) => quote! {
                docbind::entity::CollectionSpec::named(#collection_name)
            },
            None => quote! {
                docbind::entity::CollectionSpec::new()
            },
        };
        let spec = if no_auto_setup {
            quote! { #spec.no_auto_setup(true) }
        } else {
            spec
        };

        quote! {
            fn collection() -> Option<docbind::entity::CollectionSpec> {
                Some(#spec)
            }
        }
    } else {
        // No `#[entity]` attribute: leave the trait default (`None`) in place.
        quote! {}
    };

    let indexes_code = if indexes.is_empty() {
        quote! {}
    } else {
        let specs: Vec<_> = indexes
            .iter()
            .map(|index| {
                let key = &index.key;
                let mut spec = quote! { docbind::entity::IndexSpec::on(#key) };
                if index.descending {
                    spec = quote! { #spec.direction(docbind::entity::IndexDirection::Desc) };
                }
                if index.unique {
                    spec = quote! { #spec.unique(true) };
                }
                if index.background {
                    spec = quote! { #spec.background(true) };
                }
                spec
            })
            .collect();

        quote! {
            fn indexes() -> Vec<docbind::entity::IndexSpec> {
                vec![#(#specs),*]
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics docbind::entity::Entity for #name #ty_generics #where_clause {
            #collection_code
            #indexes_code
        }
    };

    Ok(TokenStream::from(expanded))
}
