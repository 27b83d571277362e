//! End-to-end schema application tests over the in-memory backend.

use bson::doc;
use docbind::memory::InMemoryBackend;
use docbind::prelude::*;

mod model {
    use docbind::Entity;
    use serde::{Deserialize, Serialize};

    // Blank explicit name: resolution falls back to the type's simple name.
    #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
    #[entity(collection = "")]
    pub struct Widget {
        pub label: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
    #[entity(collection = "orders")]
    #[index(key = "status")]
    #[index(key = "email", unique)]
    pub struct Order {
        pub status: String,
        pub email: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
    #[entity(collection = "audit_log", no_auto_setup)]
    #[index(key = "recorded_at", direction = "desc", background)]
    pub struct AuditRecord {
        pub recorded_at: i64,
        pub message: String,
    }

    // No `#[entity]` attribute: convertible, but carries no collection.
    #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
    pub struct Draft {
        pub body: String,
    }

    // Indexes without a collection: usable only with an explicit name.
    #[derive(Debug, Clone, Serialize, Deserialize, Entity)]
    #[index(key = "tag")]
    pub struct Tagged {
        pub tag: String,
    }
}

use model::{AuditRecord, Draft, Order, Tagged, Widget};

fn manager() -> (SchemaManager<InMemoryBackend>, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    (SchemaManager::new(backend.clone()), backend)
}

#[test]
fn blank_collection_name_resolves_to_type_name() {
    assert_eq!(collection_name_for::<Widget>().unwrap(), "Widget");
}

#[test]
fn explicit_collection_name_wins() {
    assert_eq!(collection_name_for::<Order>().unwrap(), "orders");
}

#[test]
fn setup_collection_ensures_declared_indexes() {
    let (manager, backend) = manager();

    manager.setup_collection::<Order>().unwrap();

    let indexes = backend.indexes("orders");
    assert_eq!(indexes.len(), 2);

    assert_eq!(indexes[0].keys, doc! { "status": 1 });
    assert!(!indexes[0].settings.unique);
    assert!(!indexes[0].settings.background);

    assert_eq!(indexes[1].keys, doc! { "email": 1 });
    assert!(indexes[1].settings.unique);
    assert!(!indexes[1].settings.background);
}

#[test]
fn setup_collection_twice_is_idempotent() {
    let (manager, backend) = manager();

    manager.setup_collection::<Order>().unwrap();
    manager.setup_collection::<Order>().unwrap();

    assert_eq!(backend.index_count("orders"), 2);
}

#[test]
fn direction_and_background_flags_are_applied() {
    let (manager, backend) = manager();

    manager.setup_collection::<AuditRecord>().unwrap();

    let indexes = backend.indexes("audit_log");
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].keys, doc! { "recorded_at": -1 });
    assert!(indexes[0].settings.background);
}

#[test]
fn setup_collection_named_uses_explicit_name() {
    let (manager, backend) = manager();

    manager.setup_collection_named::<Order>("orders_archive").unwrap();

    assert_eq!(backend.index_count("orders_archive"), 2);
    assert_eq!(backend.index_count("orders"), 0);
}

#[test]
fn setup_collection_named_works_without_collection_metadata() {
    let (manager, backend) = manager();

    manager.setup_collection_named::<Tagged>("tags").unwrap();

    assert_eq!(backend.index_count("tags"), 1);
    assert!(matches!(
        manager.entity_collection::<Tagged>(),
        Err(DocBindError::MissingMetadata(_))
    ));
}

#[test]
fn setup_collection_named_blank_is_a_no_op() {
    let (manager, backend) = manager();

    manager.setup_collection_named::<Order>("  ").unwrap();

    assert!(backend.collections().is_empty());
}

#[test]
fn collection_by_blank_name_is_none() {
    let (manager, _) = manager();

    assert!(manager.collection("").is_none());
    assert!(manager.collection("   ").is_none());
    assert_eq!(manager.collection("anything").unwrap().name(), "anything");
}

#[test]
fn entity_collection_without_metadata_is_loud() {
    let (manager, _) = manager();

    let result = manager.entity_collection::<Draft>();
    assert!(matches!(result, Err(DocBindError::MissingMetadata(name)) if name == "Draft"));
}

#[test]
fn ensure_indexes_without_collection_is_a_no_op() {
    let (manager, backend) = manager();

    manager.ensure_indexes::<Order>(None).unwrap();

    assert!(backend.collections().is_empty());
}

#[test]
fn auto_setup_applies_in_scope_types_and_skips_opt_outs() {
    let (manager, backend) = manager();

    let mut registry = SchemaRegistry::new();
    registry.register::<Widget>().unwrap();
    registry.register::<Order>().unwrap();
    registry.register::<AuditRecord>().unwrap();

    manager.auto_setup("schema_setup::model", &registry).unwrap();

    assert_eq!(backend.index_count("orders"), 2);
    // Widget declares no indexes, so its collection is never touched.
    assert_eq!(backend.index_count("Widget"), 0);
    // AuditRecord opted out of auto-setup.
    assert_eq!(backend.index_count("audit_log"), 0);
}

#[test]
fn auto_setup_ignores_out_of_scope_types() {
    let (manager, backend) = manager();

    let mut registry = SchemaRegistry::new();
    registry.register::<Order>().unwrap();

    manager.auto_setup("some::other::module", &registry).unwrap();

    assert!(backend.collections().is_empty());
}

#[test]
fn auto_setup_with_empty_scope_matches_everything() {
    let (manager, backend) = manager();

    let mut registry = SchemaRegistry::new();
    registry.register::<Order>().unwrap();

    manager.auto_setup("", &registry).unwrap();

    assert_eq!(backend.index_count("orders"), 2);
}

#[test]
fn registering_an_unannotated_type_is_loud() {
    let mut registry = SchemaRegistry::new();

    let result = registry.register::<Draft>();
    assert!(matches!(result, Err(DocBindError::MissingMetadata(name)) if name == "Draft"));
}

#[test]
fn shutdown_releases_the_backend() {
    let (manager, _) = manager();
    manager.shutdown().unwrap();
}
