//! Bidirectional conversion between typed entities and generic documents.
//!
//! This module provides the [`DocumentConverter`], a stateless-per-call
//! conversion engine between any `Serialize`/`Deserialize` entity and a
//! [`bson::Document`], governed by a [`DocumentMapper`] that holds the
//! conversion policy.
//!
//! # Soft failure
//!
//! Conversion failures are never raised across the converter API. A shape
//! mismatch is logged and surfaces as `None` (or a skipped/placeholder
//! element in the batch operations). Absent inputs are modeled as `Option`
//! arguments and propagate as `None` results.
//!
//! Unknown document fields are ignored by default. Fields present on the
//! target type but absent from the document deserialize to whatever the
//! type's serde declaration allows (`Option` fields, `#[serde(default)]`);
//! a required field with no default is a shape mismatch like any other.
//!
//! # Example
//!
//! ```ignore
//! use docbind::convert::{DocumentConverter, DeserializeFeature};
//! use bson::doc;
//!
//! let mut converter = DocumentConverter::new();
//! converter.configure(DeserializeFeature::FailOnUnknownFields, true);
//!
//! let user: Option<User> = converter.entity_from(Some(&doc! { "name": "Alice" }));
//! ```

use bson::{Bson, Document, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{DocBindError, DocBindResult};

/// Features governing entity-to-document serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeFeature {
    /// Encode date values as millisecond timestamps (`i64`) instead of the
    /// store-native date type. Disabled by default.
    WriteDatesAsTimestamps,
    /// Treat an entity that serializes to an empty document as a conversion
    /// failure. Disabled by default (empty documents are permitted).
    FailOnEmptyDocument,
}

/// Features governing document-to-entity deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeserializeFeature {
    /// Treat top-level document fields unknown to the target type as a
    /// conversion failure. Disabled by default (unknown fields are ignored
    /// silently). Nested documents are not inspected.
    FailOnUnknownFields,
}

/// Features governing general mapping behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperFeature {
    /// Sort document fields alphabetically (recursively) on serialization.
    /// Disabled by default (declaration order is preserved).
    SortFieldsAlphabetically,
}

/// Any feature from the three independent feature families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// A serialization feature.
    Serialize(SerializeFeature),
    /// A deserialization feature.
    Deserialize(DeserializeFeature),
    /// A general mapping feature.
    Mapper(MapperFeature),
}

impl From<SerializeFeature> for Feature {
    fn from(feature: SerializeFeature) -> Self {
        Feature::Serialize(feature)
    }
}

impl From<DeserializeFeature> for Feature {
    fn from(feature: DeserializeFeature) -> Self {
        Feature::Deserialize(feature)
    }
}

impl From<MapperFeature> for Feature {
    fn from(feature: MapperFeature) -> Self {
        Feature::Mapper(feature)
    }
}

/// The conversion engine: serde/bson codec plus the active feature state.
///
/// One mapper lives inside each [`DocumentConverter`]. It can also be built
/// standalone, configured, and handed to a converter via
/// [`DocumentConverter::provide_mapper`], which replaces the previous engine
/// wholesale, discarding any configuration applied before the replacement.
///
/// Unlike the converter, the mapper reports failures as errors; the
/// converter is the layer that turns them into soft `None` results.
#[derive(Debug, Clone, Default)]
pub struct DocumentMapper {
    write_dates_as_timestamps: bool,
    fail_on_empty_document: bool,
    fail_on_unknown_fields: bool,
    sort_fields_alphabetically: bool,
}

impl DocumentMapper {
    /// Creates a mapper with default policy: dates kept native, empty
    /// documents permitted, unknown fields tolerated, field order preserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the state of a feature.
    pub fn set(&mut self, feature: impl Into<Feature>, enabled: bool) {
        match feature.into() {
            Feature::Serialize(SerializeFeature::WriteDatesAsTimestamps) => {
                self.write_dates_as_timestamps = enabled
            }
            Feature::Serialize(SerializeFeature::FailOnEmptyDocument) => {
                self.fail_on_empty_document = enabled
            }
            Feature::Deserialize(DeserializeFeature::FailOnUnknownFields) => {
                self.fail_on_unknown_fields = enabled
            }
            Feature::Mapper(MapperFeature::SortFieldsAlphabetically) => {
                self.sort_fields_alphabetically = enabled
            }
        }
    }

    /// Returns the state of a feature.
    pub fn is_enabled(&self, feature: impl Into<Feature>) -> bool {
        match feature.into() {
            Feature::Serialize(SerializeFeature::WriteDatesAsTimestamps) => {
                self.write_dates_as_timestamps
            }
            Feature::Serialize(SerializeFeature::FailOnEmptyDocument) => {
                self.fail_on_empty_document
            }
            Feature::Deserialize(DeserializeFeature::FailOnUnknownFields) => {
                self.fail_on_unknown_fields
            }
            Feature::Mapper(MapperFeature::SortFieldsAlphabetically) => {
                self.sort_fields_alphabetically
            }
        }
    }

    /// Encodes an entity into a document under the active policy.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::Conversion`] if serialization fails, if the
    /// entity does not serialize to a document, or if the result is empty
    /// while [`SerializeFeature::FailOnEmptyDocument`] is enabled.
    pub fn encode<T: Serialize>(&self, entity: &T) -> DocBindResult<Document> {
        let mut document = match serialize_to_bson(entity)? {
            Bson::Document(document) => document,
            other => {
                return Err(DocBindError::Conversion(format!(
                    "serialized value is not a document: {other}"
                )));
            }
        };

        if self.write_dates_as_timestamps {
            document = document
                .into_iter()
                .map(|(key, value)| (key, dates_to_timestamps(value)))
                .collect();
        }

        if self.sort_fields_alphabetically {
            document = sort_fields(document);
        }

        if self.fail_on_empty_document && document.is_empty() {
            return Err(DocBindError::Conversion(
                "entity serialized to an empty document".to_string(),
            ));
        }

        Ok(document)
    }

    /// Decodes a document into an entity under the active policy.
    ///
    /// # Errors
    ///
    /// Returns [`DocBindError::Conversion`] if deserialization fails, or if
    /// the document carries unknown top-level fields while
    /// [`DeserializeFeature::FailOnUnknownFields`] is enabled.
    pub fn decode<T: DeserializeOwned + Serialize>(&self, document: &Document) -> DocBindResult<T> {
        let entity: T = deserialize_from_bson(Bson::Document(document.clone()))?;

        if self.fail_on_unknown_fields {
            // Re-encode to learn which fields the target type round-trips.
            if let Bson::Document(known) = serialize_to_bson(&entity)? {
                if let Some(extra) = document.keys().find(|key| !known.contains_key(key.as_str())) {
                    return Err(DocBindError::Conversion(format!(
                        "unknown field '{extra}' for target type"
                    )));
                }
            }
        }

        Ok(entity)
    }
}

fn dates_to_timestamps(value: Bson) -> Bson {
    match value {
        Bson::DateTime(datetime) => Bson::Int64(datetime.timestamp_millis()),
        Bson::Array(items) => Bson::Array(items.into_iter().map(dates_to_timestamps).collect()),
        Bson::Document(document) => Bson::Document(
            document
                .into_iter()
                .map(|(key, value)| (key, dates_to_timestamps(value)))
                .collect(),
        ),
        other => other,
    }
}

fn sort_fields(document: Document) -> Document {
    let mut entries: Vec<(String, Bson)> = document
        .into_iter()
        .map(|(key, value)| (key, sort_fields_value(value)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Document::from_iter(entries)
}

fn sort_fields_value(value: Bson) -> Bson {
    match value {
        Bson::Document(nested) => Bson::Document(sort_fields(nested)),
        Bson::Array(items) => Bson::Array(items.into_iter().map(sort_fields_value).collect()),
        other => other,
    }
}

/// Converts entities to store documents and vice versa.
///
/// The converter owns one [`DocumentMapper`], created at construction (use
/// [`builder()`](DocumentConverter::builder) to configure it up front).
/// Configuration calls mutate the engine in place and are not synchronized
/// against concurrent conversions: configure once at startup, or serialize
/// configuration changes externally.
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    mapper: DocumentMapper,
}

impl DocumentConverter {
    /// Creates a converter with the default conversion policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for configuring a converter before first use.
    pub fn builder() -> DocumentConverterBuilder {
        DocumentConverterBuilder::new()
    }

    /// Replaces the underlying conversion engine wholesale.
    ///
    /// Configuration applied before the replacement is discarded; feature
    /// settings applied afterwards act on the new engine.
    pub fn provide_mapper(&mut self, mapper: DocumentMapper) {
        self.mapper = mapper;
    }

    /// Changes the state of a conversion feature on the current engine.
    pub fn configure(&mut self, feature: impl Into<Feature>, enabled: bool) {
        self.mapper.set(feature, enabled);
    }

    /// Returns the underlying conversion engine.
    pub fn mapper(&self) -> &DocumentMapper {
        &self.mapper
    }

    /// Converts a document to an entity.
    ///
    /// Returns `None` for an absent input, and `None` (after logging) when
    /// the document is incompatible with the target shape.
    pub fn entity_from<T>(&self, document: Option<&Document>) -> Option<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let document = document?;

        match self.mapper.decode(document) {
            Ok(entity) => Some(entity),
            Err(err) => {
                log::error!("Failed to convert document to entity: {err}");
                None
            }
        }
    }

    /// Converts a sequence of documents to a list of entities.
    ///
    /// Elements that individually fail to convert are skipped, so the output
    /// may be shorter than the input. Returns `None` for an absent input,
    /// distinct from `Some(vec![])` for an empty one.
    pub fn entities_from<T, I>(&self, documents: Option<I>) -> Option<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
        I: IntoIterator<Item = Document>,
    {
        let documents = documents?;

        Some(
            documents
                .into_iter()
                .filter_map(|document| self.entity_from(Some(&document)))
                .collect(),
        )
    }

    /// Converts the first document of a result cursor to an entity.
    ///
    /// Consumes exactly one element. Returns `None` for an absent input or
    /// an empty cursor.
    pub fn first_entity_from<T, I>(&self, cursor: Option<I>) -> Option<T>
    where
        T: DeserializeOwned + Serialize,
        I: IntoIterator<Item = Document>,
    {
        let document = cursor?.into_iter().next()?;

        self.entity_from(Some(&document))
    }

    /// Converts an entity to a document.
    ///
    /// Returns `None` for an absent input, and `None` (after logging) when
    /// the entity cannot be encoded.
    pub fn document_from<T: Serialize>(&self, entity: Option<&T>) -> Option<Document> {
        let entity = entity?;

        match self.mapper.encode(entity) {
            Ok(document) => Some(document),
            Err(err) => {
                log::error!("Failed to convert entity to document: {err}");
                None
            }
        }
    }

    /// Converts a list of entities to a list of documents.
    ///
    /// Elements that individually fail to convert surface as `None`
    /// placeholders, so the output length always equals the input length.
    /// Returns `None` only when the input list itself is absent.
    pub fn documents_from<T: Serialize>(
        &self,
        entities: Option<&[T]>,
    ) -> Option<Vec<Option<Document>>> {
        let entities = entities?;

        Some(
            entities
                .iter()
                .map(|entity| self.document_from(Some(entity)))
                .collect(),
        )
    }
}

/// Builder for configuring a [`DocumentConverter`] before first use.
///
/// A provided mapper replaces the default engine first; feature settings are
/// applied afterwards, in call order.
#[derive(Debug, Default)]
pub struct DocumentConverterBuilder {
    mapper: Option<DocumentMapper>,
    features: Vec<(Feature, bool)>,
}

impl DocumentConverterBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provides a pre-configured conversion engine.
    pub fn mapper(mut self, mapper: DocumentMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Queues a feature setting to apply to the engine.
    pub fn configure(mut self, feature: impl Into<Feature>, enabled: bool) -> Self {
        self.features.push((feature.into(), enabled));
        self
    }

    /// Builds the converter.
    pub fn build(self) -> DocumentConverter {
        let mut converter = DocumentConverter::new();

        if let Some(mapper) = self.mapper {
            converter.provide_mapper(mapper);
        }
        for (feature, enabled) in self.features {
            converter.configure(feature, enabled);
        }

        converter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        name: String,
        #[serde(default)]
        age: i32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct OnlyA {
        a: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Record { a: i32 },
        Scalar(i32),
    }

    #[test]
    fn test_entity_from_round_trip() {
        let converter = DocumentConverter::new();
        let account = Account { name: "Alice".to_string(), age: 30 };

        let document = converter.document_from(Some(&account)).unwrap();
        let restored: Account = converter.entity_from(Some(&document)).unwrap();

        assert_eq!(restored, account);
    }

    #[test]
    fn test_entity_from_absent_input() {
        let converter = DocumentConverter::new();
        let entity: Option<Account> = converter.entity_from(None);
        assert!(entity.is_none());
    }

    #[test]
    fn test_entity_from_ignores_unknown_fields() {
        let converter = DocumentConverter::new();
        let document = doc! { "a": 1, "extra": "x" };

        let entity: OnlyA = converter.entity_from(Some(&document)).unwrap();
        assert_eq!(entity.a, 1);
    }

    #[test]
    fn test_entity_from_shape_mismatch_is_soft() {
        let converter = DocumentConverter::new();
        let document = doc! { "a": "not a number" };

        let entity: Option<OnlyA> = converter.entity_from(Some(&document));
        assert!(entity.is_none());
    }

    #[test]
    fn test_entity_from_missing_field_uses_default() {
        let converter = DocumentConverter::new();
        let document = doc! { "name": "Bob" };

        let account: Account = converter.entity_from(Some(&document)).unwrap();
        assert_eq!(account.age, 0);
    }

    #[test]
    fn test_entities_from_absent_vs_empty() {
        let converter = DocumentConverter::new();

        let absent: Option<Vec<OnlyA>> = converter.entities_from(None::<Vec<Document>>);
        assert!(absent.is_none());

        let empty: Vec<OnlyA> = converter.entities_from(Some(Vec::new())).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_entities_from_skips_failing_elements() {
        let converter = DocumentConverter::new();
        let documents = vec![doc! { "a": 1 }, doc! { "a": "bad" }, doc! { "a": 3 }];

        let entities: Vec<OnlyA> = converter.entities_from(Some(documents)).unwrap();
        assert_eq!(entities, vec![OnlyA { a: 1 }, OnlyA { a: 3 }]);
    }

    #[test]
    fn test_first_entity_from_takes_first() {
        let converter = DocumentConverter::new();
        let documents = vec![doc! { "a": 1 }, doc! { "a": 2 }];

        let entity: OnlyA = converter.first_entity_from(Some(documents)).unwrap();
        assert_eq!(entity.a, 1);
    }

    #[test]
    fn test_first_entity_from_empty_cursor() {
        let converter = DocumentConverter::new();

        let entity: Option<OnlyA> = converter.first_entity_from(Some(Vec::new()));
        assert!(entity.is_none());

        let entity: Option<OnlyA> = converter.first_entity_from(None::<Vec<Document>>);
        assert!(entity.is_none());
    }

    #[test]
    fn test_document_from_absent_input() {
        let converter = DocumentConverter::new();
        assert!(converter.document_from(None::<&Account>).is_none());
    }

    #[test]
    fn test_documents_from_keeps_placeholders() {
        let converter = DocumentConverter::new();
        let entities = vec![
            Payload::Record { a: 1 },
            Payload::Scalar(2),
            Payload::Record { a: 3 },
        ];

        let documents = converter.documents_from(Some(&entities)).unwrap();
        assert_eq!(documents.len(), entities.len());
        assert_eq!(documents[0], Some(doc! { "a": 1 }));
        assert_eq!(documents[1], None);
        assert_eq!(documents[2], Some(doc! { "a": 3 }));

        assert!(converter.documents_from(None::<&[Payload]>).is_none());
    }

    #[test]
    fn test_fail_on_unknown_fields() {
        let mut converter = DocumentConverter::new();
        converter.configure(DeserializeFeature::FailOnUnknownFields, true);

        let document = doc! { "a": 1, "extra": "x" };
        let entity: Option<OnlyA> = converter.entity_from(Some(&document));
        assert!(entity.is_none());

        let clean = doc! { "a": 1 };
        let entity: OnlyA = converter.entity_from(Some(&clean)).unwrap();
        assert_eq!(entity.a, 1);
    }

    #[test]
    fn test_write_dates_as_timestamps() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Stamped {
            when: bson::DateTime,
        }

        let when =
            bson::DateTime::from_chrono(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let stamped = Stamped { when };

        let converter = DocumentConverter::new();
        let document = converter.document_from(Some(&stamped)).unwrap();
        assert_eq!(document.get("when"), Some(&Bson::DateTime(when)));

        let converter = DocumentConverter::builder()
            .configure(SerializeFeature::WriteDatesAsTimestamps, true)
            .build();
        let document = converter.document_from(Some(&stamped)).unwrap();
        assert_eq!(document.get("when"), Some(&Bson::Int64(1_704_067_200_000)));
    }

    #[test]
    fn test_fail_on_empty_document() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Empty {}

        let converter = DocumentConverter::new();
        let document = converter.document_from(Some(&Empty {})).unwrap();
        assert!(document.is_empty());

        let converter = DocumentConverter::builder()
            .configure(SerializeFeature::FailOnEmptyDocument, true)
            .build();
        assert!(converter.document_from(Some(&Empty {})).is_none());
    }

    #[test]
    fn test_sort_fields_alphabetically() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Unsorted {
            b: i32,
            a: i32,
        }

        let entity = Unsorted { b: 2, a: 1 };

        let converter = DocumentConverter::new();
        let document = converter.document_from(Some(&entity)).unwrap();
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["b", "a"]);

        let converter = DocumentConverter::builder()
            .configure(MapperFeature::SortFieldsAlphabetically, true)
            .build();
        let document = converter.document_from(Some(&entity)).unwrap();
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_provide_mapper_discards_prior_configuration() {
        let mut converter = DocumentConverter::new();
        converter.configure(DeserializeFeature::FailOnUnknownFields, true);

        converter.provide_mapper(DocumentMapper::new());

        let document = doc! { "a": 1, "extra": "x" };
        let entity: OnlyA = converter.entity_from(Some(&document)).unwrap();
        assert_eq!(entity.a, 1);

        // Settings applied after the replacement act on the new engine.
        converter.configure(DeserializeFeature::FailOnUnknownFields, true);
        let entity: Option<OnlyA> = converter.entity_from(Some(&document));
        assert!(entity.is_none());
    }

    #[test]
    fn test_mapper_feature_state() {
        let mut mapper = DocumentMapper::new();
        assert!(!mapper.is_enabled(SerializeFeature::WriteDatesAsTimestamps));
        assert!(!mapper.is_enabled(SerializeFeature::FailOnEmptyDocument));
        assert!(!mapper.is_enabled(DeserializeFeature::FailOnUnknownFields));
        assert!(!mapper.is_enabled(MapperFeature::SortFieldsAlphabetically));

        mapper.set(MapperFeature::SortFieldsAlphabetically, true);
        assert!(mapper.is_enabled(MapperFeature::SortFieldsAlphabetically));
    }
}
