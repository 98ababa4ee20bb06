//! DocumentStore: CRUD over named collections
//!
//! ## Design
//!
//! DocumentStore is a thin facade over a [`Substrate`]. It holds no document
//! state of its own, only the substrate handle, its configuration and a
//! connection flag. Collections are created implicitly on first write and
//! destroyed only by [`DocumentStore::clear`].
//!
//! ## Persistence model
//!
//! One substrate entry per collection, keyed `<namespace>_<collection>`,
//! holding the JSON array of all documents in insertion order. There is no
//! secondary index: every mutating operation loads the full sequence,
//! rewrites it, and stores it back in a single cycle. A mutation either
//! fully persists or fails before any write happens.
//!
//! ## Concurrency
//!
//! There is no locking and no isolation between concurrent operations. Two
//! mutations racing on the same collection follow last-write-wins on the
//! read-modify-write cycle, silently discarding the earlier write. This
//! lost-update hazard is inherent to the single-writer design; callers that
//! share a store across threads must serialize mutations per collection
//! themselves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use ledgerstore_core::{
    validate_patch, Document, Error, Fields, Query, Result, FIELD_ID,
};
use ledgerstore_storage::Substrate;

use crate::config::StoreConfig;
use crate::id::generate_id;

/// Outcome of a delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    /// Number of documents removed
    pub deleted_count: usize,
}

/// Aggregate statistics for one collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionStats {
    /// Number of documents in the collection
    pub count: usize,
    /// Serialized byte length of the whole collection
    pub size: usize,
    /// Mean serialized byte length per document, excluding the array
    /// framing; `0.0` when the collection is empty
    pub avg_object_size: f64,
}

impl CollectionStats {
    fn empty() -> Self {
        CollectionStats {
            count: 0,
            size: 0,
            avg_object_size: 0.0,
        }
    }
}

/// Embedded document store over a key-value substrate
///
/// # Example
///
/// ```
/// use ledgerstore_engine::{DocumentStore, StoreConfig};
/// use ledgerstore_storage::MemorySubstrate;
/// use std::sync::Arc;
///
/// # fn main() -> ledgerstore_core::Result<()> {
/// let store = DocumentStore::new(Arc::new(MemorySubstrate::new()), StoreConfig::default());
/// store.connect();
///
/// let mut fields = serde_json::Map::new();
/// fields.insert("amount".into(), serde_json::json!(12));
/// let doc = store.save("transactions", fields)?;
/// assert!(doc.id().is_some());
/// # Ok(())
/// # }
/// ```
pub struct DocumentStore {
    substrate: Arc<dyn Substrate>,
    config: StoreConfig,
    connected: AtomicBool,
}

impl DocumentStore {
    /// Create a store over the given substrate, initially disconnected
    pub fn new(substrate: Arc<dyn Substrate>, config: StoreConfig) -> Self {
        DocumentStore {
            substrate,
            config,
            connected: AtomicBool::new(false),
        }
    }

    /// This store's configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ========== Lifecycle ==========

    /// Mark the store available; idempotent, safe under concurrent calls
    pub fn connect(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    /// Mark the store unavailable; subsequent data operations fail fast
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Current availability flag
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    // ========== Collection plumbing ==========

    fn collection_key(&self, collection: &str) -> String {
        format!("{}_{collection}", self.config.namespace)
    }

    /// Load the full document sequence; absent key means empty collection
    fn load(&self, collection: &str) -> Result<Vec<Document>> {
        let key = self.collection_key(collection);
        match self.substrate.get(&key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                warn!(collection, "stored payload is not valid JSON");
                Error::Serialization(format!("collection {collection:?}: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, collection: &str, docs: &[Document]) -> Result<()> {
        let key = self.collection_key(collection);
        let raw = serde_json::to_string(docs)?;
        self.substrate.set(&key, &raw)
    }

    // ========== Data operations ==========

    /// Append a new document to `collection` and return the stored form
    ///
    /// Caller fields are merged with a generated `_id` (unless supplied) and
    /// fresh `createdAt`/`updatedAt` timestamps. A supplied `_id` must be a
    /// string and must not collide with a document already in the
    /// collection; ids are unique within a collection.
    pub fn save(&self, collection: &str, fields: Fields) -> Result<Document> {
        self.ensure_connected()?;

        let mut docs = self.load(collection)?;
        if let Some(id) = fields.get(FIELD_ID) {
            let id = id.as_str().ok_or_else(|| {
                Error::Validation(format!("field {FIELD_ID:?} must be a string"))
            })?;
            if docs.iter().any(|d| d.id() == Some(id)) {
                return Err(Error::Validation(format!(
                    "document with {FIELD_ID:?} {id:?} already exists in {collection:?}"
                )));
            }
        }

        let doc = Document::shape(fields, generate_id(), ledgerstore_core::now_millis());
        docs.push(doc.clone());
        self.persist(collection, &docs)?;
        debug!(collection, id = doc.id(), "saved document");
        Ok(doc)
    }

    /// All documents matching `query`, in insertion order
    ///
    /// The empty query matches everything; an absent collection yields an
    /// empty sequence.
    pub fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        self.ensure_connected()?;
        query.validate()?;
        let docs = self.load(collection)?;
        Ok(docs.into_iter().filter(|d| query.matches(d)).collect())
    }

    /// Number of documents matching `query`
    pub fn count(&self, collection: &str, query: &Query) -> Result<usize> {
        self.ensure_connected()?;
        query.validate()?;
        let docs = self.load(collection)?;
        Ok(docs.iter().filter(|d| query.matches(d)).count())
    }

    /// Merge `patch` into every document matching `query`
    ///
    /// Patch fields override document fields, everything else is preserved,
    /// and `updatedAt` is refreshed on each matched document. Returns the
    /// post-update state of the matched documents in insertion order.
    pub fn update(&self, collection: &str, query: &Query, patch: Fields) -> Result<Vec<Document>> {
        self.ensure_connected()?;
        query.validate()?;
        validate_patch(&patch)?;

        let now = ledgerstore_core::now_millis();
        let mut docs = self.load(collection)?;
        let mut updated = Vec::new();
        for doc in docs.iter_mut() {
            if query.matches(doc) {
                doc.apply_patch(&patch, now);
                updated.push(doc.clone());
            }
        }
        self.persist(collection, &docs)?;
        debug!(collection, matched = updated.len(), "updated documents");
        Ok(updated)
    }

    /// Remove every document matching `query`
    ///
    /// Uses the same matching rule as find/update: documents that match all
    /// query fields are removed, everything else is kept.
    pub fn delete(&self, collection: &str, query: &Query) -> Result<DeleteResult> {
        self.ensure_connected()?;
        query.validate()?;

        let docs = self.load(collection)?;
        let before = docs.len();
        let remaining: Vec<Document> = docs.into_iter().filter(|d| !query.matches(d)).collect();
        let deleted_count = before - remaining.len();
        self.persist(collection, &remaining)?;
        debug!(collection, deleted_count, "deleted documents");
        Ok(DeleteResult { deleted_count })
    }

    /// Aggregate statistics for `collection`
    ///
    /// All-zero stats for an empty or absent collection.
    pub fn stats(&self, collection: &str) -> Result<CollectionStats> {
        self.ensure_connected()?;
        let key = self.collection_key(collection);
        let raw = match self.substrate.get(&key)? {
            Some(raw) => raw,
            None => return Ok(CollectionStats::empty()),
        };
        let docs: Vec<Document> = serde_json::from_str(&raw)
            .map_err(|e| Error::Serialization(format!("collection {collection:?}: {e}")))?;
        if docs.is_empty() {
            return Ok(CollectionStats::empty());
        }
        let mut document_bytes = 0usize;
        for doc in &docs {
            document_bytes += serde_json::to_string(doc)?.len();
        }
        Ok(CollectionStats {
            count: docs.len(),
            size: raw.len(),
            avg_object_size: document_bytes as f64 / docs.len() as f64,
        })
    }

    /// Drop `collection` entirely, removing its substrate entry
    pub fn clear(&self, collection: &str) -> Result<()> {
        self.ensure_connected()?;
        let key = self.collection_key(collection);
        self.substrate.remove(&key)?;
        debug!(collection, "cleared collection");
        Ok(())
    }

    /// Names of all collections in this store's namespace
    pub fn collections(&self) -> Result<Vec<String>> {
        self.ensure_connected()?;
        let prefix = format!("{}_", self.config.namespace);
        let mut names: Vec<String> = self
            .substrate
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}
