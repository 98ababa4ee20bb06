//! Model: per-collection facade over the engine
//!
//! A `Model` binds one collection name to a shared [`DocumentStore`] and
//! re-exposes the engine under driver vocabulary. Every facade call desugars
//! to engine calls on that one collection; the facade adds no semantics of
//! its own beyond cardinality:
//!
//! - `update_one`/`delete_one` act on the first match in insertion order,
//!   targeted through its `_id`
//! - `update_many`/`delete_many` keep the engine's all-matches aggregate
//!   behavior

use serde::Serialize;
use std::sync::Arc;

use ledgerstore_core::{Document, Error, Fields, Query, Result, FIELD_ID};
use ledgerstore_engine::{DeleteResult, DocumentStore};

/// Driver-shaped handle to one collection
#[derive(Clone)]
pub struct Model {
    store: Arc<DocumentStore>,
    collection: String,
}

impl Model {
    /// Bind a collection name to a store
    pub fn new(store: Arc<DocumentStore>, collection: impl Into<String>) -> Self {
        Model {
            store,
            collection: collection.into(),
        }
    }

    /// The collection this model is bound to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// All documents matching `query`, in insertion order
    pub fn find(&self, query: &Query) -> Result<Vec<Document>> {
        self.store.find(&self.collection, query)
    }

    /// First match in insertion order, or `None`; zero matches never error
    pub fn find_one(&self, query: &Query) -> Result<Option<Document>> {
        Ok(self.find(query)?.into_iter().next())
    }

    /// Insert a new document and return its stored form
    pub fn create(&self, fields: Fields) -> Result<Document> {
        self.store.save(&self.collection, fields)
    }

    /// Insert a caller-typed value; it must serialize to a JSON object
    pub fn create_typed<T: Serialize>(&self, value: &T) -> Result<Document> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(fields) => self.create(fields),
            other => Err(Error::Validation(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Patch the first matching document; `None` when nothing matched
    pub fn update_one(&self, query: &Query, patch: Fields) -> Result<Option<Document>> {
        let target = match self.find_one(query)? {
            Some(doc) => doc,
            None => return Ok(None),
        };
        let updated = self
            .store
            .update(&self.collection, &Self::by_id(&target)?, patch)?;
        Ok(updated.into_iter().next())
    }

    /// Patch every matching document; returns their post-update state
    pub fn update_many(&self, query: &Query, patch: Fields) -> Result<Vec<Document>> {
        self.store.update(&self.collection, query, patch)
    }

    /// Remove the first matching document; `deleted_count` is 0 or 1
    pub fn delete_one(&self, query: &Query) -> Result<DeleteResult> {
        let target = match self.find_one(query)? {
            Some(doc) => doc,
            None => return Ok(DeleteResult { deleted_count: 0 }),
        };
        self.store.delete(&self.collection, &Self::by_id(&target)?)
    }

    /// Remove every matching document
    pub fn delete_many(&self, query: &Query) -> Result<DeleteResult> {
        self.store.delete(&self.collection, query)
    }

    /// Number of documents matching `query`
    pub fn count_documents(&self, query: &Query) -> Result<usize> {
        self.store.count(&self.collection, query)
    }

    fn by_id(doc: &Document) -> Result<Query> {
        let id = doc
            .id()
            .ok_or_else(|| Error::Storage("stored document has no _id".to_string()))?;
        Ok(Query::field(FIELD_ID, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySubstrate, StoreConfig};
    use serde_json::json;

    fn model(collection: &str) -> Model {
        let store = Arc::new(DocumentStore::new(
            Arc::new(MemorySubstrate::new()),
            StoreConfig::default(),
        ));
        store.connect();
        Model::new(store, collection)
    }

    fn fields(pairs: &[(&str, serde_json::Value)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_find_one_returns_none_for_zero_matches() {
        let m = model("tx");
        assert_eq!(m.find_one(&Query::field("type", json!("x"))).unwrap(), None);
    }

    #[test]
    fn test_find_one_returns_first_in_insertion_order() {
        let m = model("tx");
        let first = m.create(fields(&[("type", json!("expense"))])).unwrap();
        m.create(fields(&[("type", json!("expense"))])).unwrap();

        let found = m
            .find_one(&Query::field("type", json!("expense")))
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), first.id());
    }

    #[test]
    fn test_update_one_touches_only_first_match() {
        let m = model("tx");
        m.create(fields(&[("type", json!("expense")), ("amount", json!(1))]))
            .unwrap();
        m.create(fields(&[("type", json!("expense")), ("amount", json!(2))]))
            .unwrap();

        let updated = m
            .update_one(
                &Query::field("type", json!("expense")),
                fields(&[("amount", json!(99))]),
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("amount"), Some(&json!(99)));

        let all = m.find(&Query::all()).unwrap();
        assert_eq!(all[0].get("amount"), Some(&json!(99)));
        assert_eq!(all[1].get("amount"), Some(&json!(2)));
    }

    #[test]
    fn test_delete_one_removes_a_single_document() {
        let m = model("tx");
        m.create(fields(&[("type", json!("expense"))])).unwrap();
        m.create(fields(&[("type", json!("expense"))])).unwrap();

        let result = m.delete_one(&Query::field("type", json!("expense"))).unwrap();
        assert_eq!(result.deleted_count, 1);
        assert_eq!(m.count_documents(&Query::all()).unwrap(), 1);
    }

    #[test]
    fn test_delete_one_on_no_match_is_zero() {
        let m = model("tx");
        let result = m.delete_one(&Query::field("type", json!("x"))).unwrap();
        assert_eq!(result.deleted_count, 0);
    }

    #[test]
    fn test_create_typed_rejects_non_objects() {
        let m = model("tx");
        assert!(matches!(
            m.create_typed(&"just a string"),
            Err(Error::Validation(_))
        ));
    }
}
